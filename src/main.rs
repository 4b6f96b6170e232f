//! slugreg - command-line access to the slug registry.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use slugreg::cli::{self, Cli, Commands};
use slugreg::config::{SlugregConfig, init_config};
use slugreg::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    init_config(SlugregConfig::load(cli.config.as_deref())?);

    match &cli.command {
        Commands::Validate {
            field,
            slugs,
            omit_mandatory,
        } => cli::write::validate(field, slugs, *omit_mandatory),
        Commands::Save {
            owner,
            field,
            slugs,
        } => cli::write::save(owner, field, slugs),
        Commands::Import { owner, field, csv } => cli::write::import(owner, field, csv),
        Commands::Delete { record } => cli::write::delete(*record),
        Commands::Load { owner, field } => cli::read::load(owner, field),
        Commands::Export { owner, field } => cli::read::export(owner, field),
        Commands::Resolve { path, site } => cli::read::resolve(path, *site),
    }
}
