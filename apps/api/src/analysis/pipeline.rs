//! Pipeline: composes the analysis components into the service's use cases.
//!
//! Résumé extraction:  TextExtractor → FieldExtractor + SectionClassifier
//! Matching:           Tokenizer → CompatibilityScorer → SuggestionGenerator
//! Portfolio:          ImageDecoder → RegionHeuristicDetector
//!
//! The pipeline holds no per-request state. External collaborators are the
//! only fallible, slow calls; each runs once under a `CancelSignal`, and its
//! failure is resolved through an explicit `FallbackPolicy`.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info};

use crate::analysis::cancel::CancelSignal;
use crate::analysis::catalog::model_catalog;
use crate::analysis::compatibility::{
    relevant_features, summarize, CompatibilityScorer, JobRecallScorer,
};
use crate::analysis::fallback::FallbackPolicy;
use crate::analysis::fields::FieldExtractor;
use crate::analysis::regions::{fallback_region, RegionHeuristicDetector};
use crate::analysis::sections::SectionClassifier;
use crate::analysis::suggestions::SuggestionGenerator;
use crate::analysis::tokenizer::TokenSet;
use crate::errors::AppError;
use crate::extraction::{file_extension, DocumentFormat, ImageDecoder, TextExtractor};
use crate::models::catalog::ModelCatalogEntry;
use crate::models::matching::{MatchRequest, MatchResult};
use crate::models::portfolio::{ClassifyPortfolioResult, DetectedRegion};
use crate::models::resume::OcrResumeResult;

pub const PDF_PLACEHOLDER_TEXT: &str =
    "Name: [Extracted via OCR]\nEmail: [Extracted via OCR]\nExperience: [Extracted via OCR]";

pub const IMAGE_PLACEHOLDER_TEXT: &str = "Pietro Saka\nEmail: pietro@example.com\nPhone: (11) 98765-4321\n\n\
    Experience:\n- Senior .NET Developer (2020-2024)\n- Systems Analyst (2018-2020)\n\n\
    Skills: C#, .NET, ASP.NET Core, SQL Server, Azure, Docker";

/// Text of one uploaded document. Lives for a single request.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub format: DocumentFormat,
}

/// Fallback policy of the résumé use case, per source format.
#[derive(Debug, Clone)]
pub struct ResumeFallback {
    pub pdf: FallbackPolicy<String>,
    pub image: FallbackPolicy<String>,
    pub plain_text: FallbackPolicy<String>,
}

impl Default for ResumeFallback {
    fn default() -> Self {
        Self {
            pdf: FallbackPolicy::Substitute(PDF_PLACEHOLDER_TEXT.to_string()),
            image: FallbackPolicy::Substitute(IMAGE_PLACEHOLDER_TEXT.to_string()),
            plain_text: FallbackPolicy::Propagate,
        }
    }
}

impl ResumeFallback {
    pub fn propagate_all() -> Self {
        Self {
            pdf: FallbackPolicy::Propagate,
            image: FallbackPolicy::Propagate,
            plain_text: FallbackPolicy::Propagate,
        }
    }

    pub fn for_format(&self, format: DocumentFormat) -> &FallbackPolicy<String> {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Image => &self.image,
            DocumentFormat::PlainText => &self.plain_text,
        }
    }
}

/// Portfolio fallback: a single low-confidence "Unknown" region.
pub fn default_portfolio_fallback() -> FallbackPolicy<Vec<DetectedRegion>> {
    FallbackPolicy::Substitute(vec![fallback_region("Unknown", 0.5)])
}

pub struct Pipeline {
    text_extractor: Arc<dyn TextExtractor>,
    image_decoder: Arc<dyn ImageDecoder>,
    fields: FieldExtractor,
    sections: SectionClassifier,
    scorer: Arc<dyn CompatibilityScorer>,
    suggestions: SuggestionGenerator,
    regions: RegionHeuristicDetector,
    resume_fallback: ResumeFallback,
    portfolio_fallback: FallbackPolicy<Vec<DetectedRegion>>,
}

impl Pipeline {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        image_decoder: Arc<dyn ImageDecoder>,
    ) -> Self {
        Self {
            text_extractor,
            image_decoder,
            fields: FieldExtractor::default(),
            sections: SectionClassifier::default(),
            scorer: Arc::new(JobRecallScorer),
            suggestions: SuggestionGenerator::default(),
            regions: RegionHeuristicDetector,
            resume_fallback: ResumeFallback::default(),
            portfolio_fallback: default_portfolio_fallback(),
        }
    }

    pub fn with_field_extractor(mut self, fields: FieldExtractor) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_resume_fallback(mut self, fallback: ResumeFallback) -> Self {
        self.resume_fallback = fallback;
        self
    }

    pub fn with_portfolio_fallback(
        mut self,
        fallback: FallbackPolicy<Vec<DetectedRegion>>,
    ) -> Self {
        self.portfolio_fallback = fallback;
        self
    }

    // ────────────────────────────────────────────────────────────────────────
    // Résumé extraction
    // ────────────────────────────────────────────────────────────────────────

    /// Extracts text from an uploaded résumé and analyses it.
    ///
    /// Unsupported extensions are rejected before the extractor is called.
    /// Extractor failure is resolved through the per-format fallback policy.
    pub async fn extract_resume(
        &self,
        file_name: &str,
        bytes: Bytes,
        cancel: &CancelSignal,
    ) -> Result<OcrResumeResult, AppError> {
        let format =
            DocumentFormat::from_file_name(file_name).ok_or_else(|| unsupported(file_name))?;

        info!("Starting résumé extraction for {file_name} ({format:?}, {} bytes)", bytes.len());

        let extracted = cancel
            .guard(self.text_extractor.extract(bytes, format))
            .await?;
        let resolved = self.resume_fallback.for_format(format).resolve(extracted)?;

        let document = Document {
            text: resolved.value,
            format,
        };
        let result = self.analyze_document(document, resolved.degraded);

        info!(
            "Résumé extraction finished: {} characters, {} skills, degraded={}",
            result.text.chars().count(),
            result.fields.skills.len(),
            result.degraded
        );
        Ok(result)
    }

    /// Runs field extraction and section classification over text that is
    /// already available. Total over all input.
    pub fn analyze_document(&self, document: Document, degraded: bool) -> OcrResumeResult {
        let fields = self.fields.extract(&document.text);
        let classification = self.sections.classify(&document.text);

        OcrResumeResult {
            text: document.text,
            source_format: document.format,
            fields,
            classification,
            processed_at: Utc::now(),
            degraded,
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Matching
    // ────────────────────────────────────────────────────────────────────────

    pub fn match_documents(&self, request: &MatchRequest) -> Result<MatchResult, AppError> {
        if request.resume_text.trim().is_empty() {
            return Err(AppError::Validation("resumeText is required".to_string()));
        }
        if request.job_description.trim().is_empty() {
            return Err(AppError::Validation("jobDescription is required".to_string()));
        }

        info!(
            "Computing match for candidate {}",
            request.candidate_id.as_deref().unwrap_or("<anonymous>")
        );

        let resume = TokenSet::from_text(&request.resume_text);
        let job = TokenSet::from_text(&request.job_description);
        debug!("Token sets: resume={}, job={}", resume.len(), job.len());

        let score = self.scorer.score(&resume, &job);
        let result = MatchResult {
            compatibility_score: score,
            relevant_features: relevant_features(&resume, &job),
            summary: summarize(score),
            suggestions: self.suggestions.suggest(&resume, &job),
            processed_at: Utc::now(),
        };

        info!("Match computed by {}: score {score}", self.scorer.backend());
        Ok(result)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Portfolio classification
    // ────────────────────────────────────────────────────────────────────────

    /// Guesses coarse regions in a portfolio image from its dimensions.
    /// Only image formats are accepted.
    pub async fn classify_portfolio(
        &self,
        file_name: &str,
        bytes: Bytes,
        cancel: &CancelSignal,
    ) -> Result<ClassifyPortfolioResult, AppError> {
        if DocumentFormat::from_file_name(file_name) != Some(DocumentFormat::Image) {
            return Err(unsupported(file_name));
        }

        info!("Starting portfolio classification for {file_name}");

        let decoded = cancel.guard(self.image_decoder.decode(bytes)).await?;
        let detected = decoded.map(|dims| {
            debug!("Image dimensions: {}x{}", dims.width, dims.height);
            self.regions
                .detect(f64::from(dims.width), f64::from(dims.height))
        });
        let resolved = self.portfolio_fallback.resolve(detected)?;

        info!("Detected {} regions", resolved.value.len());
        Ok(ClassifyPortfolioResult {
            detected_objects: resolved.value,
            processed_at: Utc::now(),
            degraded: resolved.degraded,
        })
    }

    pub fn models(&self) -> &'static [ModelCatalogEntry] {
        model_catalog()
    }
}

fn unsupported(file_name: &str) -> AppError {
    match file_extension(file_name) {
        "" => AppError::UnsupportedFormat("(no extension)".to_string()),
        ext => AppError::UnsupportedFormat(format!(".{}", ext.to_lowercase())),
    }
}
