use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A maintenance work order against a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technician: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MaintenanceRecord {
    pub fn new(id: impl Into<String>, vehicle_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            ..Default::default()
        }
    }
}
