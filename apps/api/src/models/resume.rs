use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::DocumentFormat;

/// A single value pulled out of résumé text, tagged with the fixed confidence
/// of the rule that produced it. The default (empty value, zero confidence)
/// means "not found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    pub value: String,
    pub confidence: f64,
}

impl ExtractedField {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    pub confidence: f64,
}

/// Structured fields of a résumé. Skills follow vocabulary order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFields {
    pub name: ExtractedField,
    pub email: ExtractedField,
    pub phone: ExtractedField,
    pub skills: Vec<ExtractedSkill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFlags {
    pub has_experience: bool,
    pub has_education: bool,
    pub has_certifications: bool,
    pub overall_confidence: f64,
}

/// Output of the résumé extraction use case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResumeResult {
    pub text: String,
    pub source_format: DocumentFormat,
    pub fields: ResumeFields,
    pub classification: SectionFlags,
    pub processed_at: DateTime<Utc>,
    /// True when the text came from the fallback placeholder instead of the extractor.
    pub degraded: bool,
}
