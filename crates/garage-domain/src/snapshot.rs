//! Point-in-time bundle of every domain collection.
//!
//! A `DomainSnapshot` is what a backup stores and what an import carries.
//! Each collection is optional: a bundle produced by a backup always holds
//! all four, while a hand-written or partial import may hold only some.
//! Restoring a bundle touches exactly the collections it carries.

use crate::{Invoice, MaintenanceRecord, User, Vehicle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format tag written into every snapshot and export.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// The four collection names, in the order backups and restores visit them.
pub const COLLECTION_NAMES: [&str; 4] = ["vehicles", "maintenance", "invoices", "users"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Vec<MaintenanceRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Vec<Invoice>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DomainSnapshot {
    /// Bundle complete copies of all four collections.
    pub fn capture(
        vehicles: Vec<Vehicle>,
        maintenance: Vec<MaintenanceRecord>,
        invoices: Vec<Invoice>,
        users: Vec<User>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            vehicles: Some(vehicles),
            maintenance: Some(maintenance),
            invoices: Some(invoices),
            users: Some(users),
            timestamp: Some(timestamp),
            version: Some(SNAPSHOT_VERSION.to_string()),
        }
    }

    /// True when the bundle carries none of the four collections.
    pub fn carries_nothing(&self) -> bool {
        self.vehicles.is_none()
            && self.maintenance.is_none()
            && self.invoices.is_none()
            && self.users.is_none()
    }

    /// Names and record counts of the collections present in this bundle.
    pub fn present_collections(&self) -> Vec<(&'static str, usize)> {
        let counts = [
            self.vehicles.as_ref().map(Vec::len),
            self.maintenance.as_ref().map(Vec::len),
            self.invoices.as_ref().map(Vec::len),
            self.users.as_ref().map(Vec::len),
        ];
        COLLECTION_NAMES
            .iter()
            .zip(counts)
            .filter_map(|(name, count)| count.map(|c| (*name, c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_carries_everything() {
        let snapshot = DomainSnapshot::capture(
            vec![Vehicle::new("v1", "京A12345")],
            vec![],
            vec![],
            vec![],
            Utc::now(),
        );

        assert!(!snapshot.carries_nothing());
        assert_eq!(snapshot.version.as_deref(), Some(SNAPSHOT_VERSION));
        assert_eq!(
            snapshot.present_collections(),
            vec![("vehicles", 1), ("maintenance", 0), ("invoices", 0), ("users", 0)]
        );
    }

    #[test]
    fn test_partial_bundle_deserialization() {
        let json = r#"{"vehicles": [{"id": "v1"}]}"#;
        let snapshot: DomainSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.vehicles.as_ref().map(Vec::len), Some(1));
        assert!(snapshot.maintenance.is_none());
        assert!(snapshot.invoices.is_none());
        assert!(snapshot.users.is_none());
        assert!(snapshot.timestamp.is_none());
    }

    #[test]
    fn test_absent_collections_are_not_serialized() {
        let snapshot = DomainSnapshot {
            invoices: Some(vec![]),
            ..Default::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();

        assert!(value.get("invoices").is_some());
        assert!(value.get("vehicles").is_none());
        assert!(value.get("timestamp").is_none());
    }

    #[test]
    fn test_empty_object_carries_nothing() {
        let snapshot: DomainSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.carries_nothing());
        assert!(snapshot.present_collections().is_empty());
    }
}
