use std::collections::HashSet;

use crate::models::resume::SectionFlags;

/// Fixed confidence reported with every classification.
pub const DEFAULT_OVERALL_CONFIDENCE: f64 = 0.88;

/// Keyword tables per section. A section is present when any of its keywords
/// occurs in the lower-cased text. `SectionClassifier::new` lower-cases and
/// trims the entries and drops blanks.
#[derive(Debug, Clone)]
pub struct SectionKeywords {
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

impl Default for SectionKeywords {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            experience: owned(&["experience", "work", "experiência", "trabalho"]),
            education: owned(&["education", "training", "educação", "formação", "graduação"]),
            certifications: owned(&[
                "certificate",
                "certification",
                "certificado",
                "certificação",
            ]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionClassifier {
    keywords: SectionKeywords,
    overall_confidence: f64,
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new(SectionKeywords::default(), DEFAULT_OVERALL_CONFIDENCE)
    }
}

impl SectionClassifier {
    pub fn new(keywords: SectionKeywords, overall_confidence: f64) -> Self {
        Self {
            keywords: SectionKeywords {
                experience: normalize(keywords.experience),
                education: normalize(keywords.education),
                certifications: normalize(keywords.certifications),
            },
            overall_confidence,
        }
    }

    pub fn classify(&self, text: &str) -> SectionFlags {
        let text_lower = text.to_lowercase();
        let mentions = |words: &[String]| words.iter().any(|w| text_lower.contains(w.as_str()));

        SectionFlags {
            has_experience: mentions(&self.keywords.experience),
            has_education: mentions(&self.keywords.education),
            has_certifications: mentions(&self.keywords.certifications),
            overall_confidence: self.overall_confidence,
        }
    }
}

/// Lower-cases and trims keywords, dropping blanks and duplicates.
fn normalize(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .collect()
}
