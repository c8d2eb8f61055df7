//! Compatibility scoring: how much of a job description a résumé covers.
//!
//! Default: `JobRecallScorer`, the share of distinct job tokens that also
//! appear in the résumé. It is a containment ratio, not a symmetric
//! similarity: swapping the arguments changes the result.
//!
//! The pipeline holds an `Arc<dyn CompatibilityScorer>`, so another backend
//! can be swapped in without touching callers.

use crate::analysis::tokenizer::TokenSet;

/// Relevant features are shared tokens longer than this many characters.
pub const MIN_FEATURE_CHARS: usize = 3;
pub const MAX_RELEVANT_FEATURES: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait CompatibilityScorer: Send + Sync {
    /// Returns a score in `0..=100`.
    fn score(&self, resume: &TokenSet, job: &TokenSet) -> u32;

    /// Short label for logs, e.g. "job-recall".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// JobRecallScorer
// ────────────────────────────────────────────────────────────────────────────

/// `round(100 × |resume ∩ job| / |job|)`, or 0 when the job has no tokens.
pub struct JobRecallScorer;

impl CompatibilityScorer for JobRecallScorer {
    fn score(&self, resume: &TokenSet, job: &TokenSet) -> u32 {
        if job.is_empty() {
            return 0;
        }
        let shared = job.intersection(resume).count();
        let total = job.len();
        // integer round-half-up of 100 * shared / total
        (((200 * shared + total) / (2 * total)) as u32).min(100)
    }

    fn backend(&self) -> &'static str {
        "job-recall"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Relevant features & summary
// ────────────────────────────────────────────────────────────────────────────

/// Shared tokens longer than `MIN_FEATURE_CHARS`, in résumé order, capped at
/// `MAX_RELEVANT_FEATURES`.
pub fn relevant_features(resume: &TokenSet, job: &TokenSet) -> Vec<String> {
    resume
        .intersection(job)
        .filter(|t| t.chars().count() > MIN_FEATURE_CHARS)
        .take(MAX_RELEVANT_FEATURES)
        .map(str::to_string)
        .collect()
}

/// Human-readable summary for a score. Always embeds the numeric score.
pub fn summarize(score: u32) -> String {
    if score >= 80 {
        format!(
            "Strong fit: the candidate shows {score}% compatibility with the position. \
             The résumé covers most of the terms the job description asks for."
        )
    } else if score >= 60 {
        format!(
            "Moderate fit: the candidate shows {score}% compatibility with the position. \
             Relevant experience is present, with some requirements left unaddressed."
        )
    } else {
        format!(
            "Low fit: the candidate shows {score}% compatibility with the position. \
             Many terms from the job description are missing from the résumé."
        )
    }
}
