//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::address::{Container, OwnerContext, RecordId};

/// Slug registry CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: slugreg.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check slugs against the path rules without saving
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        field: FieldArgs,

        /// Slugs as `PATH[:SITE]`
        #[arg(value_name = "SLUG")]
        slugs: Vec<String>,

        /// Skip the mandatory-field check
        #[arg(long)]
        omit_mandatory: bool,
    },

    /// Replace the slugs of an owner field
    #[command(visible_alias = "s")]
    Save {
        #[command(flatten)]
        owner: OwnerArgs,

        #[command(flatten)]
        field: FieldArgs,

        /// Slugs as `PATH[:SITE]`; none clears the field
        #[arg(value_name = "SLUG")]
        slugs: Vec<String>,
    },

    /// Print the slugs of an owner field as JSON
    #[command(visible_alias = "l")]
    Load {
        #[command(flatten)]
        owner: OwnerArgs,

        /// Field name
        #[arg(short, long, default_value = "slug")]
        field: String,
    },

    /// Find the live owner of a slug
    #[command(visible_alias = "r")]
    Resolve {
        /// Slug path, e.g. `/news/hello`
        path: String,

        /// Site id (default scope when omitted)
        #[arg(short, long)]
        site: Option<i64>,
    },

    /// Delete every slug of a record
    #[command(visible_alias = "d")]
    Delete {
        /// Record id
        #[arg(short, long)]
        record: RecordId,
    },

    /// Print the slugs of an owner field as `path:site` pairs
    Export {
        #[command(flatten)]
        owner: OwnerArgs,

        /// Field name
        #[arg(short, long, default_value = "slug")]
        field: String,
    },

    /// Replace the slugs of an owner field from `path:site` pairs
    Import {
        #[command(flatten)]
        owner: OwnerArgs,

        #[command(flatten)]
        field: FieldArgs,

        /// Comma-separated `path:site` pairs, e.g. `/a:1,/b:`
        #[arg(value_name = "CSV", default_value = "")]
        csv: String,
    },
}

/// Slug field selection.
#[derive(clap::Args, Debug, Clone)]
pub struct FieldArgs {
    /// Record class declaring the field
    #[arg(short, long)]
    pub class: String,

    /// Field name
    #[arg(short, long, default_value = "slug")]
    pub field: String,
}

/// Owner position of a slug field inside a record.
#[derive(clap::Args, Debug, Clone)]
pub struct OwnerArgs {
    /// Record id
    #[arg(short, long)]
    pub record: RecordId,

    /// Locale of a localized field
    #[arg(long)]
    pub locale: Option<String>,

    /// Collection field holding the slug field
    #[arg(long, requires = "index", conflicts_with = "brick")]
    pub collection: Option<String>,

    /// Item index within the collection
    #[arg(long, requires = "collection")]
    pub index: Option<usize>,

    /// Sub-block field holding the slug field
    #[arg(long, requires = "variant")]
    pub brick: Option<String>,

    /// Variant type within the sub-block
    #[arg(long, requires = "brick")]
    pub variant: Option<String>,
}

impl OwnerArgs {
    /// Build the owner context described by the flags.
    ///
    /// A locale combined with a container addresses a localized field
    /// nested inside that container.
    pub fn context(&self) -> OwnerContext {
        let container = match (&self.collection, self.index, &self.brick, &self.variant) {
            (Some(field), Some(index), _, _) => Some(Container::CollectionItem {
                field: field.clone(),
                index,
            }),
            (_, _, Some(field), Some(variant)) => Some(Container::SubBlockVariant {
                field: field.clone(),
                variant: variant.clone(),
            }),
            _ => None,
        };

        match (&self.locale, container) {
            (Some(locale), Some(container)) => {
                OwnerContext::localized(self.record, locale).within(container)
            }
            (Some(locale), None) => OwnerContext::localized(self.record, locale),
            (None, Some(Container::CollectionItem { field, index })) => {
                OwnerContext::collection_item(self.record, field, index)
            }
            (None, Some(Container::SubBlockVariant { field, variant })) => {
                OwnerContext::sub_block(self.record, field, variant)
            }
            (None, None) => OwnerContext::record(self.record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("slugreg").chain(args.iter().copied())).unwrap()
    }

    fn owner(cli: Cli) -> OwnerContext {
        match cli.command {
            Commands::Load { owner, .. } => owner.context(),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_owner_plain_record() {
        let ctx = owner(parse(&["load", "--record", "7"]));
        assert_eq!(ctx, OwnerContext::record(7));
    }

    #[test]
    fn test_owner_collection_item() {
        let ctx = owner(parse(&["load", "-r", "7", "--collection", "items", "--index", "2"]));
        assert_eq!(ctx, OwnerContext::collection_item(7, "items", 2));
    }

    #[test]
    fn test_owner_nested_localized() {
        let ctx = owner(parse(&[
            "load", "-r", "7", "--locale", "de", "--brick", "bricks", "--variant", "Teaser",
        ]));
        assert_eq!(
            ctx,
            OwnerContext::localized(7, "de").within(Container::SubBlockVariant {
                field: "bricks".into(),
                variant: "Teaser".into(),
            })
        );
    }

    #[test]
    fn test_owner_container_flags_conflict() {
        let result = Cli::try_parse_from([
            "slugreg", "load", "-r", "1", "--collection", "items", "--index", "0", "--brick",
            "bricks", "--variant", "Teaser",
        ]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["slugreg", "load", "-r", "1", "--index", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["-v", "resolve", "/a", "--site", "2", "-C", "custom.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::Resolve { ref path, site: Some(2) } if path == "/a"
        ));
    }
}
