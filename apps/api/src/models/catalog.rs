use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "OCR")]
    Ocr,
    Matching,
    Classification,
}

/// Descriptive record of a model exposed by `GET /api/v1/ai/models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalogEntry {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub metrics: BTreeMap<String, f64>,
}
