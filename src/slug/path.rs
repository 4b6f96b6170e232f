//! Slug path validation.
//!
//! A slug path is `/` followed by one or more `/`-separated segments, with an
//! optional single trailing `/`. Each segment must already be in sanitized
//! key form; nothing is rewritten on the caller's behalf.
//!
//! ```text
//! "/news/hello"   ok   -> ["news", "hello"]
//! "/news/"        ok   -> ["news"]
//! "news"          err  (no leading slash)
//! "/a//b"         err  (empty segment)
//! "/a?b"          err  (segment differs from "a-b")
//! ```

use rustc_hash::FxHashSet;

use super::diagnostics::{PathError, SlugDiagnostics, ValidationError};
use super::field::SlugField;
use super::sanitize::KeySanitizer;
use super::value::SlugValue;

/// Hierarchical document namespace that slugs must not shadow.
pub trait DocumentTree: Send + Sync {
    fn exists_at_path(&self, path: &str) -> bool;
}

/// Document tree with no documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocuments;

impl DocumentTree for NoDocuments {
    fn exists_at_path(&self, _path: &str) -> bool {
        false
    }
}

/// Validates slug paths against the segment grammar and the document tree.
#[derive(Clone, Copy)]
pub struct PathValidator<'a> {
    documents: &'a dyn DocumentTree,
    keys: &'a dyn KeySanitizer,
}

impl<'a> PathValidator<'a> {
    pub fn new(documents: &'a dyn DocumentTree, keys: &'a dyn KeySanitizer) -> Self {
        Self { documents, keys }
    }

    /// Validate one raw path, returning its segments.
    ///
    /// An empty path is valid and has no segments.
    pub fn validate<'p>(&self, raw: &'p str) -> Result<Vec<&'p str>, PathError> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        if raw.len() < 2 || !raw.starts_with('/') {
            return Err(PathError::Malformed);
        }
        if self.documents.exists_at_path(raw) {
            return Err(PathError::DocumentConflict);
        }

        let body = &raw[1..];
        let body = body.strip_suffix('/').unwrap_or(body);

        let segments: Vec<&str> = body.split('/').collect();
        for segment in &segments {
            if segment.is_empty() {
                return Err(PathError::EmptySegment);
            }
            if self.keys.sanitize_key(segment) != *segment {
                return Err(PathError::InvalidSegment((*segment).to_string()));
            }
        }
        Ok(segments)
    }

    /// Validate a full slug set for one field.
    ///
    /// Every offending item is reported. The mandatory rule is skipped when
    /// `omit_mandatory` is set.
    pub fn validate_set(
        &self,
        field: &SlugField,
        values: &[SlugValue],
        omit_mandatory: bool,
    ) -> Result<(), SlugDiagnostics> {
        let mut diag = SlugDiagnostics::new();
        let mut seen = FxHashSet::default();

        for value in values {
            if let Err(source) = self.validate(&value.path) {
                diag.push(ValidationError::Path {
                    path: value.path.clone(),
                    site_id: value.site_id,
                    source,
                });
                continue;
            }
            if value.has_path() && !seen.insert((value.path.as_str(), value.effective_site_id()))
            {
                diag.push(ValidationError::Duplicate {
                    path: value.path.clone(),
                    site_id: value.site_id,
                });
            }
        }

        if !omit_mandatory && field.mandatory && !values.iter().any(SlugValue::has_path) {
            diag.push(ValidationError::MandatoryMissing {
                field: field.name.clone(),
            });
        }

        diag.into_result()
    }
}
