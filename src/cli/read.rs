//! Commands that read slugs.

use anyhow::Result;

use super::args::OwnerArgs;
use super::common::{SlugOutput, open_registry};
use crate::config::cfg;
use crate::log;
use crate::slug::to_csv;

/// Print the slugs of an owner field as JSON.
pub fn load(owner: &OwnerArgs, field: &str) -> Result<()> {
    let config = cfg();
    let registry = open_registry(&config)?;
    let output: Vec<SlugOutput> = registry
        .load(&owner.context(), field)?
        .into_iter()
        .map(|value| SlugOutput::new(value, &config.sites))
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the slugs of an owner field as `path:site` pairs.
pub fn export(owner: &OwnerArgs, field: &str) -> Result<()> {
    let config = cfg();
    let registry = open_registry(&config)?;
    let values = registry.load(&owner.context(), field)?;
    println!("{}", to_csv(&values));
    Ok(())
}

/// Print the live owner of a slug as JSON, or `null`.
pub fn resolve(path: &str, site: Option<i64>) -> Result<()> {
    let config = cfg();
    let registry = open_registry(&config)?;
    let output = registry
        .resolve(path, site)?
        .map(|value| SlugOutput::new(value, &config.sites));

    if output.is_none() {
        log!("slug"; "`{}` is not assigned", path);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
