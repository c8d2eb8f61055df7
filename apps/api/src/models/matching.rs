use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

/// Compatibility assessment of a résumé against a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub compatibility_score: u32, // 0 – 100
    pub relevant_features: Vec<String>,
    pub summary: String,
    pub suggestions: Vec<String>,
    pub processed_at: DateTime<Utc>,
}
