//! Shared helpers for registry commands.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use crate::config::SlugregConfig;
use crate::registry::SlugRegistry;
use crate::slug::{SiteLookup, SlugField, SlugValue, parse_item};
use crate::store::FileStore;

/// Open the configured file store behind a registry.
pub fn open_registry(config: &SlugregConfig) -> Result<SlugRegistry<FileStore>> {
    let path = config.store_path();
    let store = FileStore::open(&path)
        .with_context(|| format!("failed to open slug store `{}`", path.display()))?;
    Ok(SlugRegistry::new(store, config.actions()).with_documents(config.documents()))
}

/// Look up a field declared in `[[fields]]`.
pub fn declared_field(config: &SlugregConfig, class: &str, name: &str) -> Result<SlugField> {
    config.field(class, name).ok_or_else(|| {
        anyhow!(
            "field `{}.{}` is not declared; add a `[[fields]]` entry to slugreg.toml",
            class,
            name
        )
    })
}

/// Parse `PATH[:SITE]` arguments.
pub fn parse_slugs(items: &[String]) -> Result<Vec<SlugValue>> {
    items
        .iter()
        .map(|item| parse_item(item).map_err(Into::into))
        .collect()
}

/// A slug as printed by `load` and `resolve`.
#[derive(Debug, Serialize)]
pub struct SlugOutput {
    #[serde(flatten)]
    pub value: SlugValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl SlugOutput {
    pub fn new(value: SlugValue, sites: &dyn SiteLookup) -> Self {
        let domain = value.site_id.and_then(|id| sites.main_domain(id));
        Self { value, domain }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::slug::NoSites;

    #[test]
    fn test_parse_slugs() {
        let items = vec!["/a:1".to_string(), "/b".to_string()];
        let values = parse_slugs(&items).unwrap();
        assert_eq!(values, vec![SlugValue::new("/a", Some(1)), SlugValue::new("/b", None)]);

        assert!(parse_slugs(&["/a:x".to_string()]).is_err());
    }

    #[test]
    fn test_undeclared_field() {
        let config = test_parse_config("[[fields]]\nclass = \"news\"\nname = \"slug\"");
        assert!(declared_field(&config, "news", "slug").is_ok());

        let err = declared_field(&config, "news", "path").unwrap_err();
        assert!(err.to_string().contains("`news.path` is not declared"));
    }

    #[test]
    fn test_slug_output_domain() {
        let config = test_parse_config("[sites.1]\ndomain = \"example.com\"");
        let output = SlugOutput::new(SlugValue::new("/a", Some(1)), &config.sites);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"slug": "/a", "siteId": 1, "domain": "example.com"})
        );

        let output = SlugOutput::new(SlugValue::new("/a", Some(0)), &config.sites);
        assert!(serde_json::to_value(&output).unwrap().get("domain").is_none());

        let output = SlugOutput::new(SlugValue::new("/a", Some(1)), &NoSites);
        assert!(output.domain.is_none());
    }
}
