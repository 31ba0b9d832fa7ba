//! Tank domain models.
//!
//! Field names and renames follow the backend JSON payloads exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Water type of a tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TankType {
    Fresh,
    Salt,
}

/// A registered tank as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: i64,
    pub name: String,
    pub tank_type: TankType,
    pub size: f64,
    pub size_unit: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Most recent water-test results, newest first. Empty when the tank
    /// has never been tested.
    #[serde(default)]
    pub latest_water_parameters: Vec<WaterParameters>,
}

/// Payload for creating or updating a tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankDraft {
    pub name: String,
    pub tank_type: TankType,
    pub size: f64,
    pub size_unit: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A water-test reading for a tank.
///
/// The oxygen/nitrite/nitrate/ammonia values are estimates produced by the
/// test-strip inference service, hence the `estimated_` prefix on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterParameters {
    pub temperature: f64,
    #[serde(rename = "estimated_oxygen_mgL")]
    pub estimated_oxygen_mg_l: f64,
    pub estimated_nitrite_ppm: f64,
    pub estimated_nitrate_ppm: f64,
    pub estimated_ammonia_ppm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A species stocked in a tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankSpecies {
    pub id: i64,
    pub class_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub last_scan_image_url: Option<String>,
}

/// Payload for adding a species to a tank.
///
/// `species_name` carries the human-readable name from the scan metadata;
/// manual adds leave it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesDraft {
    pub tank_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_name: Option<String>,
    pub class_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub last_scan_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tank_type_wire_format() {
        assert_eq!(serde_json::to_string(&TankType::Fresh).unwrap(), "\"FRESH\"");
        assert_eq!(serde_json::to_string(&TankType::Salt).unwrap(), "\"SALT\"");
        let parsed: TankType = serde_json::from_str("\"FRESH\"").unwrap();
        assert_eq!(parsed, TankType::Fresh);
    }

    #[test]
    fn test_tank_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": 3,
            "name": "Reef",
            "tank_type": "SALT",
            "size": 120.0,
            "size_unit": "L"
        }"#;
        let tank: Tank = serde_json::from_str(json).unwrap();
        assert_eq!(tank.id, 3);
        assert!(tank.notes.is_none());
        assert!(tank.latest_water_parameters.is_empty());
    }

    #[test]
    fn test_water_parameters_oxygen_rename() {
        let params = WaterParameters {
            temperature: 24.5,
            estimated_oxygen_mg_l: 7.1,
            estimated_nitrite_ppm: 0.1,
            estimated_nitrate_ppm: 10.0,
            estimated_ammonia_ppm: 0.0,
            recorded_at: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("estimated_oxygen_mgL").is_some());
        assert!(json.get("estimated_oxygen_mg_l").is_none());
    }
}
