use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A vehicle tracked from intake to exit.
///
/// Timestamps are kept as the strings the front desk entered so records
/// from older clients survive a round-trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_phone: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub entry_time: Option<String>,
    #[serde(default)]
    pub exit_time: Option<String>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, license_plate: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            license_plate: license_plate.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let json = r#"{"id":"v1","licensePlate":"京A12345","mileage":120000}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();

        assert_eq!(vehicle.license_plate, "京A12345");
        assert_eq!(vehicle.extra["mileage"], 120000);

        let back: Value = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(back["mileage"], 120000);
        assert_eq!(back["licensePlate"], "京A12345");
    }

    #[test]
    fn test_missing_fields_default() {
        let vehicle: Vehicle = serde_json::from_str(r#"{"id":"v2"}"#).unwrap();
        assert!(vehicle.license_plate.is_empty());
        assert!(vehicle.exit_time.is_none());
    }
}
