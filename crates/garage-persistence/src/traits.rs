use async_trait::async_trait;
use garage_core::GarageResult;
use garage_domain::{Invoice, MaintenanceRecord, User, Vehicle};
use std::fmt;

/// Fixed namespace of the persistent key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Vehicles,
    Maintenance,
    Invoices,
    Users,
    BackupHistory,
    Settings,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Maintenance => "maintenance",
            Self::Invoices => "invoices",
            Self::Users => "users",
            Self::BackupHistory => "backup-history",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for abstract key-value storage
/// Every `set` replaces the whole value stored under the key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Raw bytes stored under `key`, or `None` if nothing was ever written
    async fn get(&self, key: StorageKey) -> GarageResult<Option<Vec<u8>>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: StorageKey, value: &[u8]) -> GarageResult<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove(&self, key: StorageKey) -> GarageResult<()>;
}

/// Read access to the shop's domain collections
/// Backups and exports read through this instead of a concrete store
#[async_trait]
pub trait DomainDataProvider: Send + Sync {
    async fn get_vehicles(&self) -> Vec<Vehicle>;

    async fn get_maintenance_records(&self) -> Vec<MaintenanceRecord>;

    async fn get_invoices(&self) -> Vec<Invoice>;

    async fn get_users(&self) -> Vec<User>;
}
