//! Registry error type.

use thiserror::Error;

use crate::address::RecordId;
use crate::slug::SlugDiagnostics;
use crate::store::StoreError;

/// Failure of a registry operation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The candidate set was rejected before anything was written.
    #[error(transparent)]
    Validation(#[from] SlugDiagnostics),

    /// The slug belongs to a live owner elsewhere.
    #[error(
        "slug `{path}` (site {site_id}) is already used by record {record_id} \
         (class `{class_id}`, field `{field_name}`)"
    )]
    AlreadyOwned {
        path: String,
        site_id: i64,
        record_id: RecordId,
        class_id: String,
        field_name: String,
    },

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl RegistryError {
    /// Check whether this error is a validation rejection.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
