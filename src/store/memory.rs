//! In-process slug table.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{InsertOutcome, SlugRecord, SlugStore, StoreError};
use crate::address::{OwnerAddress, OwnerFilter, RecordId};

/// Thread-safe slug table.
///
/// Rows are kept in insertion order; the `(slug, siteId)` index is checked
/// and updated under the same write lock as the row itself.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    next_seq: u64,
    /// Insertion sequence -> row.
    by_seq: BTreeMap<u64, SlugRecord>,
    /// `(slug, siteId)` -> insertion sequence.
    by_key: FxHashMap<(String, i64), u64>,
}

impl Rows {
    fn insert(&mut self, row: SlugRecord) -> bool {
        let key = (row.path.clone(), row.site_id);
        if self.by_key.contains_key(&key) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_key.insert(key, seq);
        self.by_seq.insert(seq, row);
        true
    }

    fn remove_where(&mut self, predicate: impl Fn(&SlugRecord) -> bool) -> usize {
        let doomed: Vec<u64> = self
            .by_seq
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(seq, _)| *seq)
            .collect();
        for seq in &doomed {
            if let Some(row) = self.by_seq.remove(seq) {
                self.by_key.remove(&(row.path, row.site_id));
            }
        }
        doomed.len()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing rows.
    ///
    /// Returns the first row whose `(slug, siteId)` is already taken.
    pub fn from_records(records: Vec<SlugRecord>) -> Result<Self, SlugRecord> {
        let mut rows = Rows::default();
        for record in records {
            if !rows.insert(record.clone()) {
                return Err(record);
            }
        }
        Ok(Self {
            rows: RwLock::new(rows),
        })
    }

    /// All rows in insertion order.
    pub fn snapshot(&self) -> Vec<SlugRecord> {
        self.rows.read().by_seq.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().by_seq.is_empty()
    }
}

impl SlugStore for MemoryStore {
    fn delete_where(
        &self,
        record_id: RecordId,
        field: &str,
        address: &OwnerAddress,
    ) -> Result<usize, StoreError> {
        Ok(self
            .rows
            .write()
            .remove_where(|row| row.is_owned_by(record_id, field, address)))
    }

    fn insert(&self, row: &SlugRecord) -> InsertOutcome {
        if self.rows.write().insert(row.clone()) {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::Conflict
        }
    }

    fn find_by_path_and_site(
        &self,
        path: &str,
        site_id: i64,
    ) -> Result<Option<SlugRecord>, StoreError> {
        let rows = self.rows.read();
        Ok(rows
            .by_key
            .get(&(path.to_string(), site_id))
            .and_then(|seq| rows.by_seq.get(seq))
            .cloned())
    }

    fn load_by_owner(&self, filter: &OwnerFilter) -> Result<Vec<SlugRecord>, StoreError> {
        Ok(self
            .rows
            .read()
            .by_seq
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }

    fn delete_all_for_record(&self, record_id: RecordId) -> Result<usize, StoreError> {
        Ok(self
            .rows
            .write()
            .remove_where(|row| row.record_id == record_id))
    }

    fn delete_stale(&self, row: &SlugRecord) -> Result<bool, StoreError> {
        Ok(self.rows.write().remove_where(|stored| stored == row) > 0)
    }
}
