use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::models::catalog::{ModelCatalogEntry, ModelType};

static MODEL_CATALOG: Lazy<Vec<ModelCatalogEntry>> = Lazy::new(|| {
    vec![
        entry("Tesseract OCR", "5.0.0", ModelType::Ocr, &[("WER", 0.15), ("Accuracy", 0.85)]),
        entry(
            "Resume Matching Model",
            "1.0.0",
            ModelType::Matching,
            &[("F1-Score", 0.82), ("Precision", 0.79), ("Recall", 0.85)],
        ),
        entry(
            "Resume Classification",
            "1.0.0",
            ModelType::Classification,
            &[("Accuracy", 0.91), ("F1-Score", 0.88)],
        ),
    ]
});

fn entry(
    name: &str,
    version: &str,
    model_type: ModelType,
    metrics: &[(&str, f64)],
) -> ModelCatalogEntry {
    ModelCatalogEntry {
        name: name.to_string(),
        version: version.to_string(),
        model_type,
        metrics: metrics
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Static, declared list of the models behind the service. Returned verbatim.
pub fn model_catalog() -> &'static [ModelCatalogEntry] {
    &MODEL_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_three_models() {
        let names: Vec<_> = model_catalog().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Tesseract OCR", "Resume Matching Model", "Resume Classification"]
        );
    }

    #[test]
    fn test_ocr_metrics() {
        let ocr = &model_catalog()[0];
        assert_eq!(ocr.model_type, ModelType::Ocr);
        assert_eq!(ocr.metrics.get("WER"), Some(&0.15));
        assert_eq!(ocr.metrics.get("Accuracy"), Some(&0.85));
    }

    #[test]
    fn test_serialized_type_field() {
        let json = serde_json::to_value(&model_catalog()[0]).unwrap();
        assert_eq!(json["type"], "OCR");
        assert_eq!(json["version"], "5.0.0");
    }
}
