//! Full-replace save.
//!
//! ```text
//! validate ─► resolve address ─► delete old rows ─► insert each row
//!                                                       │ Conflict
//!                                                       ▼
//!                                        look up holder ─► none: retry once
//!                                                       ├► stale: reclaim, retry once
//!                                                       └► live: AlreadyOwned
//! ```
//!
//! Each row gets at most one retry. Deletes already applied are not rolled
//! back when a later insert fails.

use super::{RegistryError, SlugRegistry};
use crate::address::OwnerContext;
use crate::slug::{SlugField, SlugValue};
use crate::store::{InsertOutcome, SlugRecord, SlugStore, StoreError};
use crate::{debug, log};

/// What to do after an insert hit a taken key.
enum Recovery {
    /// The key is free again.
    Retry,
    /// The key belongs to a live owner.
    Owned(SlugRecord),
}

impl<S: SlugStore> SlugRegistry<S> {
    /// Replace the slugs of one owner field.
    ///
    /// The whole set is validated first; an invalid set writes nothing.
    /// Empty paths are accepted and not stored.
    pub fn save(
        &self,
        ctx: &OwnerContext,
        class_id: &str,
        field: &SlugField,
        values: &[SlugValue],
    ) -> Result<(), RegistryError> {
        self.validate_set(field, values, false)?;

        let record_id = ctx.record_id();
        let result = self.replace(ctx, class_id, field, values);
        self.cache.invalidate(record_id);
        result
    }

    fn replace(
        &self,
        ctx: &OwnerContext,
        class_id: &str,
        field: &SlugField,
        values: &[SlugValue],
    ) -> Result<(), RegistryError> {
        let address = ctx.address();
        let rows: Vec<SlugRecord> = values
            .iter()
            .filter(|value| value.has_path())
            .map(|value| SlugRecord {
                path: value.path.clone(),
                site_id: value.effective_site_id(),
                record_id: ctx.record_id(),
                class_id: class_id.to_string(),
                field_name: field.name.clone(),
                address: address.clone(),
            })
            .collect();

        let removed = self
            .store
            .delete_where(ctx.record_id(), &field.name, &address)?;
        debug!(
            "slug"; "record {} field `{}`: replacing {} row(s) with {}",
            ctx.record_id(), field.name, removed, rows.len()
        );

        for row in &rows {
            self.insert_row(row)?;
        }
        Ok(())
    }

    fn insert_row(&self, row: &SlugRecord) -> Result<(), RegistryError> {
        let mut retried = false;
        loop {
            match self.store.insert(row) {
                InsertOutcome::Inserted => return Ok(()),
                InsertOutcome::Fatal(err) => return Err(err.into()),
                InsertOutcome::Conflict if retried => return Err(self.give_up(row)),
                InsertOutcome::Conflict => {
                    debug!("slug"; "conflict on `{}` (site {})", row.path, row.site_id);
                    match self.recover(row)? {
                        Recovery::Retry => retried = true,
                        Recovery::Owned(holder) => return Err(already_owned(holder)),
                    }
                }
            }
        }
    }

    fn recover(&self, row: &SlugRecord) -> Result<Recovery, StoreError> {
        let Some(holder) = self.store.find_by_path_and_site(&row.path, row.site_id)? else {
            debug!("slug"; "`{}` (site {}) was freed, retrying", row.path, row.site_id);
            return Ok(Recovery::Retry);
        };
        Ok(match self.probe(&holder)? {
            Some(_) => Recovery::Owned(holder),
            None => Recovery::Retry,
        })
    }

    /// Build the error for a row that conflicted again after its retry.
    fn give_up(&self, row: &SlugRecord) -> RegistryError {
        log!(
            "slug"; "giving up on `{}` (site {}) after one retry",
            row.path, row.site_id
        );
        match self.store.find_by_path_and_site(&row.path, row.site_id) {
            Ok(Some(holder)) => already_owned(holder),
            Ok(None) => StoreError::Contended {
                path: row.path.clone(),
                site_id: row.site_id,
            }
            .into(),
            Err(err) => err.into(),
        }
    }
}

fn already_owned(holder: SlugRecord) -> RegistryError {
    RegistryError::AlreadyOwned {
        path: holder.path,
        site_id: holder.site_id,
        record_id: holder.record_id,
        class_id: holder.class_id,
        field_name: holder.field_name,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::address::{OwnerAddress, OwnerFilter, RecordId};
    use crate::registry::{FieldActions, ProbeError};
    use crate::store::MemoryStore;

    fn actions() -> FieldActions {
        let mut actions = FieldActions::new();
        actions.declare("news", "slug", Some("News::detail".into()));
        actions
    }

    fn field() -> SlugField {
        SlugField::new("slug")
    }

    fn slug(path: &str) -> SlugValue {
        SlugValue::new(path, None)
    }

    #[test]
    fn test_save_then_load() {
        let registry = SlugRegistry::new(MemoryStore::new(), actions());
        let ctx = OwnerContext::record(1);
        registry
            .save(&ctx, "news", &field(), &[slug("/a"), SlugValue::new("/b", Some(2))])
            .unwrap();

        let loaded = registry.load(&ctx, "slug").unwrap();
        assert_eq!(
            loaded,
            vec![SlugValue::new("/a", Some(0)), SlugValue::new("/b", Some(2))]
        );
    }

    #[test]
    fn test_invalid_set_writes_nothing() {
        let registry = SlugRegistry::new(MemoryStore::new(), actions());
        let ctx = OwnerContext::record(1);
        registry.save(&ctx, "news", &field(), &[slug("/a")]).unwrap();

        let err = registry
            .save(&ctx, "news", &field(), &[slug("/b"), slug("bad")])
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.load(&ctx, "slug").unwrap()[0].path, "/a");
    }

    #[test]
    fn test_empty_paths_are_not_stored() {
        let registry = SlugRegistry::new(MemoryStore::new(), actions());
        let ctx = OwnerContext::record(1);
        registry
            .save(&ctx, "news", &field(), &[slug(""), slug("/a")])
            .unwrap();
        assert_eq!(registry.store().len(), 1);
    }

    #[test]
    fn test_live_holder_blocks_save() {
        let registry = SlugRegistry::new(MemoryStore::new(), actions());
        registry
            .save(&OwnerContext::record(1), "news", &field(), &[slug("/a")])
            .unwrap();

        let err = registry
            .save(&OwnerContext::record(2), "news", &field(), &[slug("/a")])
            .unwrap_err();
        match err {
            RegistryError::AlreadyOwned {
                path,
                site_id,
                record_id,
                class_id,
                field_name,
            } => {
                assert_eq!(path, "/a");
                assert_eq!(site_id, 0);
                assert_eq!(record_id, 1);
                assert_eq!(class_id, "news");
                assert_eq!(field_name, "slug");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stale_holder_is_reclaimed() {
        let probe = |row: &SlugRecord| -> Result<String, ProbeError> {
            if row.record_id == 1 {
                Err(ProbeError::RecordGone(1))
            } else {
                Ok(String::new())
            }
        };
        let registry = SlugRegistry::new(MemoryStore::new(), probe);
        registry
            .save(&OwnerContext::record(1), "news", &field(), &[slug("/a")])
            .unwrap();

        registry
            .save(&OwnerContext::record(2), "news", &field(), &[slug("/a")])
            .unwrap();
        let holder = registry.store().find_by_path_and_site("/a", 0).unwrap();
        assert_eq!(holder.map(|row| row.record_id), Some(2));
    }

    /// Store whose key never frees up and whose holder is never visible.
    struct Haunted {
        inserts: AtomicUsize,
    }

    impl SlugStore for Haunted {
        fn delete_where(
            &self,
            _: RecordId,
            _: &str,
            _: &OwnerAddress,
        ) -> Result<usize, StoreError> {
            Ok(0)
        }
        fn insert(&self, _: &SlugRecord) -> InsertOutcome {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            InsertOutcome::Conflict
        }
        fn find_by_path_and_site(
            &self,
            _: &str,
            _: i64,
        ) -> Result<Option<SlugRecord>, StoreError> {
            Ok(None)
        }
        fn load_by_owner(&self, _: &OwnerFilter) -> Result<Vec<SlugRecord>, StoreError> {
            Ok(Vec::new())
        }
        fn delete_all_for_record(&self, _: RecordId) -> Result<usize, StoreError> {
            Ok(0)
        }
        fn delete_stale(&self, _: &SlugRecord) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    #[test]
    fn test_retry_is_bounded() {
        let store = Arc::new(Haunted {
            inserts: AtomicUsize::new(0),
        });
        let registry = SlugRegistry::new(Arc::clone(&store), actions());

        let err = registry
            .save(&OwnerContext::record(1), "news", &field(), &[slug("/a")])
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Persistence(StoreError::Contended { .. })
        ));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 2);
    }

    /// Memory store whose first insert reports a conflict nobody holds.
    struct FlakyOnce {
        inner: MemoryStore,
        tripped: AtomicBool,
        inserts: Mutex<Vec<String>>,
    }

    impl SlugStore for FlakyOnce {
        fn delete_where(
            &self,
            record_id: RecordId,
            field: &str,
            address: &OwnerAddress,
        ) -> Result<usize, StoreError> {
            self.inner.delete_where(record_id, field, address)
        }
        fn insert(&self, row: &SlugRecord) -> InsertOutcome {
            self.inserts.lock().push(row.path.clone());
            if !self.tripped.swap(true, Ordering::SeqCst) {
                return InsertOutcome::Conflict;
            }
            self.inner.insert(row)
        }
        fn find_by_path_and_site(
            &self,
            path: &str,
            site_id: i64,
        ) -> Result<Option<SlugRecord>, StoreError> {
            self.inner.find_by_path_and_site(path, site_id)
        }
        fn load_by_owner(&self, filter: &OwnerFilter) -> Result<Vec<SlugRecord>, StoreError> {
            self.inner.load_by_owner(filter)
        }
        fn delete_all_for_record(&self, record_id: RecordId) -> Result<usize, StoreError> {
            self.inner.delete_all_for_record(record_id)
        }
        fn delete_stale(&self, row: &SlugRecord) -> Result<bool, StoreError> {
            self.inner.delete_stale(row)
        }
    }

    #[test]
    fn test_freed_conflict_retries_and_keeps_going() {
        let store = Arc::new(FlakyOnce {
            inner: MemoryStore::new(),
            tripped: AtomicBool::new(false),
            inserts: Mutex::new(Vec::new()),
        });
        let registry = SlugRegistry::new(Arc::clone(&store), actions());
        let ctx = OwnerContext::record(1);

        registry
            .save(&ctx, "news", &field(), &[slug("/a"), slug("/b")])
            .unwrap();

        assert_eq!(*store.inserts.lock(), vec!["/a", "/a", "/b"]);
        let stored: Vec<(String, RecordId)> = store
            .inner
            .snapshot()
            .into_iter()
            .map(|row| (row.path, row.record_id))
            .collect();
        assert_eq!(stored, vec![("/a".to_string(), 1), ("/b".to_string(), 1)]);
        assert_eq!(registry.load(&ctx, "slug").unwrap().len(), 2);
    }

    #[test]
    fn test_save_invalidates_cache() {
        let registry = SlugRegistry::new(MemoryStore::new(), actions());
        let ctx = OwnerContext::record(1);
        registry.save(&ctx, "news", &field(), &[slug("/a")]).unwrap();
        assert_eq!(registry.load(&ctx, "slug").unwrap().len(), 1);

        registry
            .save(&ctx, "news", &field(), &[slug("/a"), slug("/b")])
            .unwrap();
        assert_eq!(registry.load(&ctx, "slug").unwrap().len(), 2);
    }
}
