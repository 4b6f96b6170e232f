//! JSON-file slug table.
//!
//! The file is the only source of truth. Every call takes an advisory lock
//! on a `<store>.lock` sibling, re-reads the rows under it, and writes them
//! back before unlocking when they changed:
//!
//! ```text
//! lock (shared | exclusive) ─► read file ─► run op on rows ─► persist? ─► unlock
//! ```
//!
//! Handles in other processes, or other handles in this one, therefore see
//! each other's writes, and the `(slug, siteId)` check of `insert` is atomic
//! across all of them.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::{Mutex, MutexGuard};

use super::{InsertOutcome, MemoryStore, SlugRecord, SlugStore, StoreError};
use crate::address::{OwnerAddress, OwnerFilter, RecordId};
use crate::debug;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + use<> {
    let path = path.to_path_buf();
    move |err| StoreError::Io(path, err)
}

/// Lock mode for one store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

/// Held for the duration of one store call; dropping the file unlocks it.
struct StoreLock<'a> {
    _local: MutexGuard<'a, ()>,
    _file: File,
}

/// Slug table persisted as a JSON array of rows.
///
/// Mutations rewrite the file through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    /// Orders calls made through this handle.
    local: Mutex<()>,
}

impl FileStore {
    /// Open a store file, starting empty when it does not exist yet.
    ///
    /// The file is checked once here so a corrupt store fails early.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");

        let store = Self {
            path,
            lock_path: PathBuf::from(lock_path),
            local: Mutex::new(()),
        };
        let rows = store.with_rows(Access::Read, |rows| Ok(rows.len()), |_| false)?;
        debug!("store"; "opened {} ({} rows)", store.path.display(), rows);
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows in insertion order, as currently stored.
    pub fn snapshot(&self) -> Result<Vec<SlugRecord>, StoreError> {
        self.with_rows(Access::Read, |rows| Ok(rows.snapshot()), |_| false)
    }

    fn lock(&self, access: Access) -> Result<StoreLock<'_>, StoreError> {
        let local = self.local.lock();

        if let Some(parent) = self.lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(io_err(&self.lock_path))?;

        match access {
            Access::Read => FileExt::lock_shared(&file),
            Access::Write => FileExt::lock_exclusive(&file),
        }
        .map_err(io_err(&self.lock_path))?;

        Ok(StoreLock {
            _local: local,
            _file: file,
        })
    }

    /// Read the stored rows. Caller holds the lock.
    fn read_rows(&self) -> Result<MemoryStore, StoreError> {
        let records = if self.path.exists() {
            let content = fs::read_to_string(&self.path).map_err(io_err(&self.path))?;
            serde_json::from_str::<Vec<SlugRecord>>(&content)
                .map_err(|err| StoreError::Corrupt(self.path.clone(), err.to_string()))?
        } else {
            Vec::new()
        };

        MemoryStore::from_records(records).map_err(|dup| {
            StoreError::Corrupt(
                self.path.clone(),
                format!("duplicate slug `{}` for site {}", dup.path, dup.site_id),
            )
        })
    }

    /// Write the rows back. Caller holds the exclusive lock.
    fn persist(&self, rows: &MemoryStore) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&rows.snapshot())
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))
    }

    /// Run `op` on freshly read rows, persisting when `changed` says so.
    fn with_rows<T>(
        &self,
        access: Access,
        op: impl FnOnce(&MemoryStore) -> Result<T, StoreError>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, StoreError> {
        let _lock = self.lock(access)?;
        let rows = self.read_rows()?;
        let result = op(&rows)?;
        if access == Access::Write && changed(&result) {
            self.persist(&rows)?;
        }
        Ok(result)
    }
}

impl SlugStore for FileStore {
    fn delete_where(
        &self,
        record_id: RecordId,
        field: &str,
        address: &OwnerAddress,
    ) -> Result<usize, StoreError> {
        self.with_rows(
            Access::Write,
            |rows| rows.delete_where(record_id, field, address),
            |n| *n > 0,
        )
    }

    fn insert(&self, row: &SlugRecord) -> InsertOutcome {
        let result = self.with_rows(
            Access::Write,
            |rows| match rows.insert(row) {
                InsertOutcome::Fatal(err) => Err(err),
                outcome => Ok(outcome),
            },
            |outcome| matches!(outcome, InsertOutcome::Inserted),
        );
        result.unwrap_or_else(InsertOutcome::Fatal)
    }

    fn find_by_path_and_site(
        &self,
        path: &str,
        site_id: i64,
    ) -> Result<Option<SlugRecord>, StoreError> {
        self.with_rows(
            Access::Read,
            |rows| rows.find_by_path_and_site(path, site_id),
            |_| false,
        )
    }

    fn load_by_owner(&self, filter: &OwnerFilter) -> Result<Vec<SlugRecord>, StoreError> {
        self.with_rows(Access::Read, |rows| rows.load_by_owner(filter), |_| false)
    }

    fn delete_all_for_record(&self, record_id: RecordId) -> Result<usize, StoreError> {
        self.with_rows(
            Access::Write,
            |rows| rows.delete_all_for_record(record_id),
            |n| *n > 0,
        )
    }

    fn delete_stale(&self, row: &SlugRecord) -> Result<bool, StoreError> {
        self.with_rows(Access::Write, |rows| rows.delete_stale(row), |removed| *removed)
    }
}
