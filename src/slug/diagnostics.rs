//! Slug validation errors.

use owo_colors::Style;
use std::fmt;
use thiserror::Error;

use crate::logger::paint;

// ============================================================================
// PathError
// ============================================================================

/// Syntax or namespace problem with a single path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("slug must be at least 2 characters long and start with a slash")]
    Malformed,

    #[error("found conflict with document path")]
    DocumentConflict,

    #[error("slug contains an empty segment")]
    EmptySegment,

    #[error("slug segment `{0}` is not valid")]
    InvalidSegment(String),
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation failure, localized to the offending item where possible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("slug `{path}` (site {site}): {source}", site = site_label(.site_id))]
    Path {
        path: String,
        site_id: Option<i64>,
        #[source]
        source: PathError,
    },

    #[error("slug `{path}` (site {site}) is listed more than once", site = site_label(.site_id))]
    Duplicate { path: String, site_id: Option<i64> },

    #[error("mandatory field `{field}` has no slug")]
    MandatoryMissing { field: String },
}

/// Render a site id for messages, `none` when absent.
fn site_label(site_id: &Option<i64>) -> String {
    site_id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

// ============================================================================
// SlugDiagnostics
// ============================================================================

/// All validation failures found in one slug set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugDiagnostics {
    errors: Vec<ValidationError>,
}

impl SlugDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for SlugDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&paint("slug validation failed:", Style::new().red().bold()))?;
        for err in &self.errors {
            write!(f, "\n{} {}", paint("→", Style::new().red()), err)?;
        }
        Ok(())
    }
}

impl std::error::Error for SlugDiagnostics {}
