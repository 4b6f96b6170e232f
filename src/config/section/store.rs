//! `[store]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [store]
//! path = ".slugreg/slugs.json"    # Slug table file, relative to slugreg.toml
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Slug store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding the slug table.
    pub path: PathBuf,
}

impl StoreConfig {
    pub const PATH: FieldPath = FieldPath::new("store.path");

    /// Resolve the store file against the project root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::PATH,
                "store path is empty",
                "remove the field to use `.slugreg/slugs.json`",
            );
        } else if self.path.extension().is_none_or(|ext| ext != "json") {
            diag.warn(Self::PATH, "store file does not end in `.json`");
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".slugreg/slugs.json"),
        }
    }
}
