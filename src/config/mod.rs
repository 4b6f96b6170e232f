//! Registry configuration management for `slugreg.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── store      # [store]
//! │   ├── documents  # [documents]
//! │   ├── fields     # [[fields]]
//! │   └── sites      # [sites.<id>]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # SlugregConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section         | Purpose                                           |
//! |-----------------|---------------------------------------------------|
//! | `[store]`       | Slug table file                                   |
//! | `[documents]`   | Document paths a slug must not shadow             |
//! | `[[fields]]`    | Slug fields per class; backs the liveness probe   |
//! | `[sites.<id>]`  | Site directory used for display                   |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    DocumentPaths, DocumentsConfig, FieldConfig, SiteEntry, SitesConfig, StoreConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::registry::FieldActions;
use crate::slug::SlugField;
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "slugreg.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing slugreg.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlugregConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Slug store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Document tree paths
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Slug field definitions
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    /// Site directory
    #[serde(default)]
    pub sites: SitesConfig,
}

impl SlugregConfig {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Otherwise `slugreg.toml`
    /// is searched upward from cwd, and defaults rooted at cwd are used when
    /// none is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let found = match explicit {
            Some(path) => {
                let path = cwd.join(path);
                if !path.exists() {
                    bail!(ConfigError::NotFound(path));
                }
                Some(path)
            }
            None => find_config_file(Path::new(CONFIG_FILE)),
        };

        let Some(config_path) = found else {
            debug!("config"; "no {} found, using defaults", CONFIG_FILE);
            let mut config = Self::default();
            config.root = cwd;
            return Ok(config);
        };

        let mut config = Self::from_path(&config_path)?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        config.validate()?;

        debug!("config"; "loaded {}", config.config_path.display());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Absolute path of the slug store file.
    pub fn store_path(&self) -> PathBuf {
        self.store.resolve(&self.root)
    }

    /// Look up a declared slug field.
    pub fn field(&self, class: &str, name: &str) -> Option<SlugField> {
        section::find_field(&self.fields, class, name).map(FieldConfig::to_field)
    }

    /// Action table backing the liveness probe.
    pub fn actions(&self) -> FieldActions {
        section::field_actions(&self.fields)
    }

    /// Document tree for collision checks.
    pub fn documents(&self) -> DocumentPaths {
        self.documents.tree()
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.store.validate(&mut diag);
        self.documents.validate(&mut diag);
        section::validate_fields(&self.fields, &mut diag);
        self.sites.validate(&mut diag);
        self.validate_field_sites(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Field site lists should only name configured sites.
    fn validate_field_sites(&self, diag: &mut ConfigDiagnostics) {
        let known = self.sites.ids();
        for field in &self.fields {
            let Some(sites) = &field.sites else { continue };
            for site in sites {
                if *site != crate::slug::DEFAULT_SITE && !known.contains(site) {
                    diag.warn(
                        FieldConfig::SITES,
                        format!(
                            "field `{}.{}` lists unknown site {}",
                            field.class, field.name, site
                        ),
                    );
                }
            }
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SlugregConfig {
    let (parsed, ignored) = SlugregConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
