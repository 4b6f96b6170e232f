//! Slug registry service.
//!
//! Owns the write protocol that keeps `(slug, siteId)` unique across every
//! record and owner position, plus the cached load path.
//!
//! # Module Structure
//!
//! - [`save`]: full-replace save with conflict resolution
//! - [`probe`]: liveness probe deciding whether a conflicting row is stale
//! - [`cache`]: per-owner load cache
//! - [`error`]: `RegistryError`
//!
//! # Example
//!
//! ```ignore
//! let registry = SlugRegistry::new(MemoryStore::new(), actions);
//! let ctx = OwnerContext::record(42);
//! registry.save(&ctx, "news", &field, &[SlugValue::new("/news/hello", None)])?;
//! let slugs = registry.load(&ctx, "slug")?;
//! ```

mod cache;
mod error;
mod probe;
mod save;

use std::sync::Arc;

use crate::address::{OwnerContext, RecordId};
use crate::debug;
use crate::slug::{
    DEFAULT_SITE, DocumentKeys, DocumentTree, KeySanitizer, NoDocuments, PathValidator,
    SlugDiagnostics, SlugField, SlugValue,
};
use crate::store::SlugStore;
use crate::utils::Counted;

pub use cache::LoadCache;
pub use error::RegistryError;
pub use probe::{ActionResolver, FieldActions, ProbeError};

/// Slug registry over a store and its collaborators.
pub struct SlugRegistry<S> {
    store: S,
    documents: Arc<dyn DocumentTree>,
    keys: Arc<dyn KeySanitizer>,
    actions: Arc<dyn ActionResolver>,
    cache: LoadCache,
}

impl<S: SlugStore> SlugRegistry<S> {
    /// Create a registry with no documents and the default key sanitizer.
    pub fn new(store: S, actions: impl ActionResolver + 'static) -> Self {
        Self {
            store,
            documents: Arc::new(NoDocuments),
            keys: Arc::new(DocumentKeys),
            actions: Arc::new(actions),
            cache: LoadCache::new(),
        }
    }

    pub fn with_documents(mut self, documents: impl DocumentTree + 'static) -> Self {
        self.documents = Arc::new(documents);
        self
    }

    pub fn with_key_sanitizer(mut self, keys: impl KeySanitizer + 'static) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn validator(&self) -> PathValidator<'_> {
        PathValidator::new(self.documents.as_ref(), self.keys.as_ref())
    }

    /// Validate a candidate set without writing anything.
    pub fn validate_set(
        &self,
        field: &SlugField,
        values: &[SlugValue],
        omit_mandatory: bool,
    ) -> Result<(), SlugDiagnostics> {
        self.validator().validate_set(field, values, omit_mandatory)
    }

    /// Load the slugs of one owner field.
    ///
    /// Rows carry their stored site, so a value saved without a site loads
    /// back with site [`DEFAULT_SITE`].
    pub fn load(&self, ctx: &OwnerContext, field: &str) -> Result<Vec<SlugValue>, RegistryError> {
        let filter = ctx.filter(field);
        if let Some(values) = self.cache.get(&filter) {
            return Ok(values);
        }

        let ticket = self.cache.ticket(filter.record_id);
        let values: Vec<SlugValue> = self
            .store
            .load_by_owner(&filter)?
            .iter()
            .map(SlugValue::from_record)
            .collect();
        debug!(
            "slug"; "loaded {} for record {} field `{}`",
            Counted { count: values.len(), noun: "slug" }, filter.record_id, field
        );

        self.cache.fill(ticket, filter, &values);
        Ok(values)
    }

    /// Delete every slug of a record.
    pub fn delete_all_for_record(&self, record_id: RecordId) -> Result<usize, RegistryError> {
        let removed = self.store.delete_all_for_record(record_id);
        self.cache.invalidate(record_id);
        let removed = removed?;
        let count = Counted { count: removed, noun: "slug" };
        debug!("slug"; "deleted {} of record {}", count, record_id);
        Ok(removed)
    }

    /// Look up the live owner of a path.
    ///
    /// A row whose owner is gone is deleted and reported as absent.
    pub fn resolve(
        &self,
        path: &str,
        site_id: Option<i64>,
    ) -> Result<Option<SlugValue>, RegistryError> {
        let site_id = site_id.unwrap_or(DEFAULT_SITE);
        let Some(row) = self.store.find_by_path_and_site(path, site_id)? else {
            return Ok(None);
        };
        Ok(self
            .probe(&row)?
            .map(|action| SlugValue::from_record(&row).with_action(action)))
    }

    /// Drop cached loads of a record.
    pub fn invalidate(&self, record_id: RecordId) {
        self.cache.invalidate(record_id);
    }
}
