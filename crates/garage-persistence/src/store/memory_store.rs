use crate::traits::{KeyValueStore, StorageKey};
use garage_core::GarageResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local key-value store, used for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StorageKey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value directly, bypassing serialization
    pub fn with_raw(self, key: StorageKey, value: impl Into<Vec<u8>>) -> Self {
        self.entries.lock().insert(key, value.into());
        self
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: StorageKey) -> GarageResult<Option<Vec<u8>>> {
        Ok(self.entries.lock().get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: &[u8]) -> GarageResult<()> {
        self.entries.lock().insert(key, value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> GarageResult<()> {
        self.entries.lock().remove(&key);
        Ok(())
    }
}
