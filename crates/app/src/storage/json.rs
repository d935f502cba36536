//! File-backed slot storage: one JSON file per slot under a data
//! directory, rewritten in full on every store.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{Slot, Storage, StorageResult};

/// Durable slot storage on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Open (creating if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl Storage for JsonFileStorage {
    fn load(&self, slot: Slot) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(self.path(slot)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn store(&self, slot: Slot, bytes: &[u8]) -> StorageResult<()> {
        // Write to a sibling temp file then rename, so a crash mid-write
        // never leaves a half-written slot behind.
        let path = self.path(slot);
        let tmp = self.dir.join(format!("{}.json.tmp", slot.key()));

        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let storage = JsonFileStorage::open(dir.path()).expect("open should succeed");

        assert!(matches!(storage.load(Slot::Videos), Ok(None)));
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let storage = JsonFileStorage::open(dir.path()).expect("open should succeed");

        storage
            .store(Slot::Videos, b"[]")
            .expect("store should succeed");

        let loaded = storage.load(Slot::Videos).expect("load should succeed");

        assert_eq!(loaded.as_deref(), Some(b"[]".as_slice()));
    }

    #[test]
    fn slots_persist_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir should be created");

        {
            let storage = JsonFileStorage::open(dir.path()).expect("open should succeed");
            storage
                .store(Slot::TotalRevenue, b"4200")
                .expect("store should succeed");
        }

        let reopened = JsonFileStorage::open(dir.path()).expect("reopen should succeed");
        let loaded = reopened
            .load(Slot::TotalRevenue)
            .expect("load should succeed");

        assert_eq!(loaded.as_deref(), Some(b"4200".as_slice()));
    }
}
