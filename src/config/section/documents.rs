//! `[documents]` section configuration.
//!
//! Lists paths taken by the document tree. A slug equal to one of them is
//! rejected.
//!
//! # Example
//!
//! ```toml
//! [documents]
//! paths = ["/", "/about", "/news"]
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::slug::DocumentTree;

/// Occupied document paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub paths: Vec<String>,
}

impl DocumentsConfig {
    pub const PATHS: FieldPath = FieldPath::new("documents.paths");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for path in &self.paths {
            if !path.starts_with('/') {
                diag.error_with_hint(
                    Self::PATHS,
                    format!("document path `{path}` is not absolute"),
                    format!("use `/{path}`"),
                );
            }
        }
    }

    /// Build the lookup used during slug validation.
    pub fn tree(&self) -> DocumentPaths {
        DocumentPaths {
            paths: self.paths.iter().map(|p| normalize(p).to_string()).collect(),
        }
    }
}

/// Document tree backed by a fixed set of paths.
#[derive(Debug, Clone, Default)]
pub struct DocumentPaths {
    paths: FxHashSet<String>,
}

impl DocumentTree for DocumentPaths {
    fn exists_at_path(&self, path: &str) -> bool {
        self.paths.contains(normalize(path))
    }
}

/// `/news/` and `/news` name the same document.
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
