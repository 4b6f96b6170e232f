//! Slug persistence.
//!
//! Rows live in one logical table keyed by `(slug, siteId)`:
//!
//! ```text
//! object_url_slugs
//! ├── objectId   owning record
//! ├── classId    owning record class
//! ├── fieldname  owning field
//! ├── slug       path              ┐ unique
//! ├── siteId     site, 0 = none    ┘
//! └── ownertype / ownername / position   (owner address)
//! ```
//!
//! # Module Structure
//!
//! - [`memory`]: in-process table guarded by a lock
//! - [`file`]: the in-process table snapshotted to a JSON file

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{OwnerAddress, OwnerFilter, RecordId};

pub use file::FileStore;
pub use memory::MemoryStore;

/// A persisted slug row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugRecord {
    #[serde(rename = "slug")]
    pub path: String,
    #[serde(rename = "siteId", default)]
    pub site_id: i64,
    #[serde(rename = "objectId")]
    pub record_id: RecordId,
    #[serde(rename = "classId")]
    pub class_id: String,
    #[serde(rename = "fieldname")]
    pub field_name: String,
    #[serde(flatten)]
    pub address: OwnerAddress,
}

impl SlugRecord {
    /// Uniqueness key of this row.
    #[inline]
    pub fn key(&self) -> (&str, i64) {
        (&self.path, self.site_id)
    }

    /// Check whether this row belongs to the given owner field.
    pub fn is_owned_by(&self, record_id: RecordId, field: &str, address: &OwnerAddress) -> bool {
        self.record_id == record_id && self.field_name == field && self.address == *address
    }
}

/// Persistence-layer failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("slug store `{0}` is corrupt: {1}")]
    Corrupt(PathBuf, String),

    #[error("slug `{path}` (site {site_id}) is still taken after retrying")]
    Contended { path: String, site_id: i64 },

    #[error("slug store failure: {0}")]
    Backend(String),
}

/// Result of a single-row insert.
#[derive(Debug)]
#[must_use]
pub enum InsertOutcome {
    Inserted,
    /// `(slug, siteId)` is already taken.
    Conflict,
    Fatal(StoreError),
}

/// Slug table operations driven by the registry.
///
/// Implementations must make the uniqueness check and the insert of
/// [`SlugStore::insert`] atomic with respect to other inserts.
pub trait SlugStore: Send + Sync {
    /// Delete the rows of one owner field at one address.
    fn delete_where(
        &self,
        record_id: RecordId,
        field: &str,
        address: &OwnerAddress,
    ) -> Result<usize, StoreError>;

    /// Insert a row, reporting a taken `(slug, siteId)` as a conflict.
    fn insert(&self, row: &SlugRecord) -> InsertOutcome;

    fn find_by_path_and_site(
        &self,
        path: &str,
        site_id: i64,
    ) -> Result<Option<SlugRecord>, StoreError>;

    /// Load the rows matching an owner filter.
    fn load_by_owner(&self, filter: &OwnerFilter) -> Result<Vec<SlugRecord>, StoreError>;

    /// Delete every row of a record.
    fn delete_all_for_record(&self, record_id: RecordId) -> Result<usize, StoreError>;

    /// Delete `row` if it is still stored unchanged.
    fn delete_stale(&self, row: &SlugRecord) -> Result<bool, StoreError>;
}

impl<S: SlugStore + ?Sized> SlugStore for Arc<S> {
    fn delete_where(
        &self,
        record_id: RecordId,
        field: &str,
        address: &OwnerAddress,
    ) -> Result<usize, StoreError> {
        (**self).delete_where(record_id, field, address)
    }

    fn insert(&self, row: &SlugRecord) -> InsertOutcome {
        (**self).insert(row)
    }

    fn find_by_path_and_site(
        &self,
        path: &str,
        site_id: i64,
    ) -> Result<Option<SlugRecord>, StoreError> {
        (**self).find_by_path_and_site(path, site_id)
    }

    fn load_by_owner(&self, filter: &OwnerFilter) -> Result<Vec<SlugRecord>, StoreError> {
        (**self).load_by_owner(filter)
    }

    fn delete_all_for_record(&self, record_id: RecordId) -> Result<usize, StoreError> {
        (**self).delete_all_for_record(record_id)
    }

    fn delete_stale(&self, row: &SlugRecord) -> Result<bool, StoreError> {
        (**self).delete_stale(row)
    }
}
