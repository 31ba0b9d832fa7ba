//! Species-scan domain models.
//!
//! Shapes returned by the ML inference service for fish-species photos.

use serde::{Deserialize, Serialize};

/// Reference data about an identified species.
///
/// `max_size_cm` arrives as a string; the inference service does not
/// guarantee a numeric value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesMetadata {
    #[serde(default)]
    pub species_name: String,
    #[serde(default, rename = "species_Nomenclature")]
    pub species_nomenclature: String,
    #[serde(default)]
    pub max_size_cm: String,
}

/// A single species identification from a scan image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub class_name: String,
    pub confidence: f64,
    #[serde(default)]
    pub metadata: SpeciesMetadata,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Prediction {
    /// Fallback label used when the service omits a class name.
    pub const UNKNOWN_CLASS: &'static str = "Unknown";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_nomenclature_rename() {
        let json = r#"{"species_name": "Betta", "species_Nomenclature": "Betta splendens", "max_size_cm": "7"}"#;
        let meta: SpeciesMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.species_nomenclature, "Betta splendens");
    }

    #[test]
    fn test_prediction_defaults() {
        let json = r#"{"class_name": "betta", "confidence": 0.91}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert!(prediction.metadata.species_name.is_empty());
        assert!(prediction.image_url.is_none());
    }
}
