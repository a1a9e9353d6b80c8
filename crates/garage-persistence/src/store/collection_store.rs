use crate::traits::{DomainDataProvider, KeyValueStore, StorageKey};
use garage_core::{GarageError, GarageResult};
use garage_domain::{Invoice, MaintenanceRecord, User, Vehicle};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Typed JSON access to the collections of a [`KeyValueStore`]
///
/// Reads never fail: a missing key, an unreadable store or malformed JSON
/// all come back as an empty collection and a warning in the log. Writes
/// serialize the whole collection and replace the stored value in one call.
#[derive(Clone)]
pub struct CollectionStore {
    store: Arc<dyn KeyValueStore>,
}

impl CollectionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Vec<T> {
        let bytes = match self.store.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read '{}': {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Discarding malformed '{}' collection: {}", key, e);
                Vec::new()
            }
        }
    }

    pub async fn set<T: Serialize + Sync>(&self, key: StorageKey, items: &[T]) -> GarageResult<()> {
        let bytes =
            serde_json::to_vec(items).map_err(|e| GarageError::Serialization(e.to_string()))?;
        self.store.set(key, &bytes).await?;
        tracing::debug!("Stored {} records under '{}'", items.len(), key);
        Ok(())
    }

    /// A JSON object document such as `settings`; empty when absent or not an object
    pub async fn get_object(&self, key: StorageKey) -> Map<String, Value> {
        let bytes = match self.store.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Map::new(),
            Err(e) => {
                tracing::warn!("Failed to read '{}': {}", key, e);
                return Map::new();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("Ignoring '{}': not a JSON object", key);
                Map::new()
            }
            Err(e) => {
                tracing::warn!("Discarding malformed '{}' document: {}", key, e);
                Map::new()
            }
        }
    }

    pub async fn set_object(
        &self,
        key: StorageKey,
        object: &Map<String, Value>,
    ) -> GarageResult<()> {
        let bytes =
            serde_json::to_vec(object).map_err(|e| GarageError::Serialization(e.to_string()))?;
        self.store.set(key, &bytes).await
    }

    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.get(StorageKey::Vehicles).await
    }

    pub async fn maintenance(&self) -> Vec<MaintenanceRecord> {
        self.get(StorageKey::Maintenance).await
    }

    pub async fn invoices(&self) -> Vec<Invoice> {
        self.get(StorageKey::Invoices).await
    }

    pub async fn users(&self) -> Vec<User> {
        self.get(StorageKey::Users).await
    }
}

#[async_trait::async_trait]
impl DomainDataProvider for CollectionStore {
    async fn get_vehicles(&self) -> Vec<Vehicle> {
        self.vehicles().await
    }

    async fn get_maintenance_records(&self) -> Vec<MaintenanceRecord> {
        self.maintenance().await
    }

    async fn get_invoices(&self) -> Vec<Invoice> {
        self.invoices().await
    }

    async fn get_users(&self) -> Vec<User> {
        self.users().await
    }
}
