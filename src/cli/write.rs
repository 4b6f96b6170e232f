//! Commands that change or check slugs.

use anyhow::{Result, bail};

use super::args::{FieldArgs, OwnerArgs};
use super::common::{declared_field, open_registry, parse_slugs};
use crate::address::RecordId;
use crate::config::{SlugregConfig, cfg};
use crate::log;
use crate::slug::{DEFAULT_SITE, SlugValue, from_csv, preview};
use crate::utils::plural_count;

/// Validate slugs against the path rules of a declared field.
pub fn validate(field: &FieldArgs, slugs: &[String], omit_mandatory: bool) -> Result<()> {
    let config = cfg();
    let definition = declared_field(&config, &field.class, &field.field)?;
    let values = parse_slugs(slugs)?;

    let registry = open_registry(&config)?;
    registry.validate_set(&definition, &values, omit_mandatory)?;

    log!("slug"; "{} valid", plural_count(values.len(), "slug"));
    Ok(())
}

/// Replace the slugs of an owner field.
pub fn save(owner: &OwnerArgs, field: &FieldArgs, slugs: &[String]) -> Result<()> {
    let config = cfg();
    let values = parse_slugs(slugs)?;
    store(&config, owner, field, &values)
}

/// Replace the slugs of an owner field from `path:site` text.
pub fn import(owner: &OwnerArgs, field: &FieldArgs, csv: &str) -> Result<()> {
    let config = cfg();
    let values = from_csv(csv)?;
    store(&config, owner, field, &values)
}

/// Delete every slug of a record.
pub fn delete(record: RecordId) -> Result<()> {
    let config = cfg();
    let registry = open_registry(&config)?;
    let removed = registry.delete_all_for_record(record)?;
    log!("slug"; "deleted {} of record {}", plural_count(removed, "slug"), record);
    Ok(())
}

fn store(
    config: &SlugregConfig,
    owner: &OwnerArgs,
    field: &FieldArgs,
    values: &[SlugValue],
) -> Result<()> {
    let definition = declared_field(config, &field.class, &field.field)?;
    if let Some(sites) = &definition.sites
        && let Some(value) = values.iter().find(|v| {
            v.has_path()
                && v.effective_site_id() != DEFAULT_SITE
                && !sites.contains(&v.effective_site_id())
        })
    {
        bail!(
            "site {} is not enabled for field `{}.{}`",
            value.effective_site_id(),
            field.class,
            definition.name
        );
    }

    let ctx = owner.context();
    let registry = open_registry(config)?;
    registry.save(&ctx, &field.class, &definition, values)?;

    match preview(values, ", ") {
        Some(summary) => log!("slug"; "saved {}", summary),
        None => log!("slug"; "cleared `{}` of record {}", definition.name, ctx.record_id()),
    }
    Ok(())
}
