use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{KeyValueStore, StorageKey};
use garage_core::GarageResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed key-value store
/// Each key is one `<key>.json` file inside the data directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File that holds the value for `key`
    pub fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonDirStore {
    async fn get(&self, key: StorageKey) -> GarageResult<Option<Vec<u8>>> {
        AtomicWriter::read_optional(&self.path_for(key)).await
    }

    async fn set(&self, key: StorageKey, value: &[u8]) -> GarageResult<()> {
        AtomicWriter::write_atomic(&self.path_for(key), value).await
    }

    async fn remove(&self, key: StorageKey) -> GarageResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
