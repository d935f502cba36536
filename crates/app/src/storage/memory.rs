//! In-memory, HashMap-based slot storage.
//!
//! Intended for tests and embedding. Slots are held behind an `RwLock`;
//! bytes are cloned on read.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Slot, Storage, StorageResult};

/// Volatile slot storage.
#[derive(Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<Slot, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a slot, e.g. to simulate corrupt on-disk bytes in tests.
    pub fn preload(&self, slot: Slot, bytes: Vec<u8>) {
        self.slots.write().expect("lock poisoned").insert(slot, bytes);
    }
}

impl Storage for MemoryStorage {
    fn load(&self, slot: Slot) -> StorageResult<Option<Vec<u8>>> {
        let slots = self.slots.read().expect("lock poisoned");
        Ok(slots.get(&slot).cloned())
    }

    fn store(&self, slot: Slot, bytes: &[u8]) -> StorageResult<()> {
        let mut slots = self.slots.write().expect("lock poisoned");
        slots.insert(slot, bytes.to_vec());
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.slots.read().expect("lock poisoned").len();
        f.debug_struct("MemoryStorage")
            .field("slot_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_slot_loads_as_none() {
        let storage = MemoryStorage::new();

        assert!(matches!(storage.load(Slot::Users), Ok(None)));
    }

    #[test]
    fn store_then_load_round_trips() {
        let storage = MemoryStorage::new();

        storage
            .store(Slot::Cart, b"[]")
            .expect("store should succeed");

        let loaded = storage.load(Slot::Cart).expect("load should succeed");

        assert_eq!(loaded.as_deref(), Some(b"[]".as_slice()));
    }

    #[test]
    fn store_overwrites_in_full() {
        let storage = MemoryStorage::new();

        storage
            .store(Slot::Cart, b"[1,2,3]")
            .expect("store should succeed");
        storage
            .store(Slot::Cart, b"[]")
            .expect("store should succeed");

        let loaded = storage.load(Slot::Cart).expect("load should succeed");

        assert_eq!(loaded.as_deref(), Some(b"[]".as_slice()));
    }
}
