//! ML inference endpoint: species identification from scan images.

use std::path::Path;

use aqua_core::error::Result;
use aqua_core::scan::{Prediction, SpeciesMetadata};
use reqwest::multipart::Form;
use serde::Deserialize;

use crate::client::ApiClient;
use crate::marketplace::file_part;

/// Raw inference response: a single result or a batch, depending on the
/// service version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<InferenceItem>),
    One(InferenceItem),
}

#[derive(Debug, Default, Deserialize)]
struct InferenceItem {
    #[serde(default)]
    data: Option<InferenceData>,
}

#[derive(Debug, Default, Deserialize)]
struct InferenceData {
    #[serde(default)]
    predictions: Option<RawPrediction>,
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPrediction {
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    metadata: Option<SpeciesMetadata>,
}

impl ApiClient {
    /// Uploads a scan image and returns the species predictions.
    ///
    /// Missing fields in the service response fall back to an unknown class
    /// with zero confidence, matching the tolerant handling the app relies on.
    pub async fn submit_scan(&self, token: &str, image_path: &Path) -> Result<Vec<Prediction>> {
        let form = Form::new().part("image", file_part(&image_path.to_path_buf()).await?);

        let response: InferenceResponse = self
            .send_json(
                self.post("/ai-model/inference/")
                    .bearer_auth(token)
                    .multipart(form),
            )
            .await?;

        let items = match response {
            InferenceResponse::Many(items) => items,
            InferenceResponse::One(item) => vec![item],
        };

        Ok(items.into_iter().map(map_item).collect())
    }
}

fn map_item(item: InferenceItem) -> Prediction {
    let data = item.data.unwrap_or_default();
    let raw = data.predictions.unwrap_or_default();

    Prediction {
        class_name: raw
            .class_name
            .unwrap_or_else(|| Prediction::UNKNOWN_CLASS.to_string()),
        confidence: raw.confidence.unwrap_or(0.0),
        metadata: raw.metadata.unwrap_or_default(),
        image_url: data.image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_item_with_full_payload() {
        let json = r#"{
            "data": {
                "predictions": {
                    "class_name": "betta",
                    "confidence": 0.93,
                    "metadata": {
                        "species_name": "Betta",
                        "species_Nomenclature": "Betta splendens",
                        "max_size_cm": "7"
                    }
                },
                "image_url": "https://cdn.example/scan1.jpg"
            }
        }"#;
        let item: InferenceItem = serde_json::from_str(json).unwrap();
        let prediction = map_item(item);

        assert_eq!(prediction.class_name, "betta");
        assert_eq!(prediction.confidence, 0.93);
        assert_eq!(prediction.metadata.species_nomenclature, "Betta splendens");
        assert_eq!(
            prediction.image_url.as_deref(),
            Some("https://cdn.example/scan1.jpg")
        );
    }

    #[test]
    fn test_map_item_defaults_on_sparse_payload() {
        let item: InferenceItem = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        let prediction = map_item(item);

        assert_eq!(prediction.class_name, Prediction::UNKNOWN_CLASS);
        assert_eq!(prediction.confidence, 0.0);
        assert!(prediction.metadata.species_name.is_empty());
        assert!(prediction.image_url.is_none());
    }

    #[test]
    fn test_response_accepts_single_object_or_array() {
        let one: InferenceResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(matches!(one, InferenceResponse::One(_)));

        let many: InferenceResponse = serde_json::from_str(r#"[{"data": {}}, {"data": {}}]"#).unwrap();
        match many {
            InferenceResponse::Many(items) => assert_eq!(items.len(), 2),
            InferenceResponse::One(_) => panic!("expected batch"),
        }
    }
}
