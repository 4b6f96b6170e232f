//! Liveness probe for stored slugs.
//!
//! A row is live while its owner can still produce an action for it. When
//! the probe fails the row is stale: its record or field is gone and the
//! key may be reclaimed.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::SlugRegistry;
use crate::address::RecordId;
use crate::log;
use crate::store::{SlugRecord, SlugStore, StoreError};

/// Why a stored slug has no live owner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("record {0} no longer exists")]
    RecordGone(RecordId),

    #[error("class `{class}` has no slug field `{field}`")]
    FieldGone { class: String, field: String },

    #[error("{0}")]
    Other(String),
}

/// Resolves the action of a stored slug.
pub trait ActionResolver: Send + Sync {
    fn resolve_action(&self, row: &SlugRecord) -> Result<String, ProbeError>;
}

impl<F> ActionResolver for F
where
    F: Fn(&SlugRecord) -> Result<String, ProbeError> + Send + Sync,
{
    fn resolve_action(&self, row: &SlugRecord) -> Result<String, ProbeError> {
        self(row)
    }
}

/// Action table keyed by `(class, field)`.
///
/// A row is live iff its class declares the field. Fields without an
/// explicit action resolve to the empty action.
#[derive(Debug, Clone, Default)]
pub struct FieldActions {
    actions: FxHashMap<(String, String), String>,
}

impl FieldActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a slug field of a class.
    pub fn declare(
        &mut self,
        class: impl Into<String>,
        field: impl Into<String>,
        action: Option<String>,
    ) -> &mut Self {
        self.actions
            .insert((class.into(), field.into()), action.unwrap_or_default());
        self
    }

    /// Remove a field declaration, making its rows stale.
    pub fn retire(&mut self, class: &str, field: &str) -> bool {
        self.actions
            .remove(&(class.to_string(), field.to_string()))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionResolver for FieldActions {
    fn resolve_action(&self, row: &SlugRecord) -> Result<String, ProbeError> {
        self.actions
            .get(&(row.class_id.clone(), row.field_name.clone()))
            .cloned()
            .ok_or_else(|| ProbeError::FieldGone {
                class: row.class_id.clone(),
                field: row.field_name.clone(),
            })
    }
}

impl<S: SlugStore> SlugRegistry<S> {
    /// Probe a stored row, reclaiming it when stale.
    ///
    /// Returns the action of a live row, or `None` once a stale row has
    /// been deleted.
    pub(super) fn probe(&self, row: &SlugRecord) -> Result<Option<String>, StoreError> {
        match self.actions.resolve_action(row) {
            Ok(action) => Ok(Some(action)),
            Err(reason) => {
                if self.store.delete_stale(row)? {
                    log!(
                        "slug"; "reclaimed stale slug `{}` (site {}) of record {}: {}",
                        row.path, row.site_id, row.record_id, reason
                    );
                }
                self.cache.invalidate(row.record_id);
                Ok(None)
            }
        }
    }
}
