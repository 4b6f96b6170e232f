//! `[sites]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sites.1]
//! domain = "example.com"
//!
//! [sites.2]
//! domain = "example.de"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::slug::{DEFAULT_SITE, SiteLookup};

/// One site of the site directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteEntry {
    /// Main domain, e.g. `example.com`.
    pub domain: String,
}

/// Site directory keyed by site id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SitesConfig {
    entries: BTreeMap<String, SiteEntry>,
}

impl SitesConfig {
    pub const SITES: FieldPath = FieldPath::new("sites");

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Site ids in ascending order, skipping malformed keys.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().filter_map(|k| k.parse().ok()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (key, entry) in &self.entries {
            match key.parse::<i64>() {
                Ok(id) if id == DEFAULT_SITE => diag.error_with_hint(
                    Self::SITES,
                    "site 0 is the default scope and cannot be configured",
                    "number sites from 1",
                ),
                Ok(id) if id < 0 => {
                    diag.error(Self::SITES, format!("site id `{key}` is negative"));
                }
                Ok(_) => {}
                Err(_) => diag.error(Self::SITES, format!("site id `{key}` is not a number")),
            }
            if entry.domain.is_empty() {
                diag.error(Self::SITES, format!("site `{key}` has no domain"));
            }
        }
    }
}

impl SiteLookup for SitesConfig {
    fn main_domain(&self, site_id: i64) -> Option<String> {
        self.entries
            .get(&site_id.to_string())
            .map(|entry| entry.domain.clone())
    }
}
