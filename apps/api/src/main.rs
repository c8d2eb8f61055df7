mod analysis;
mod config;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::fallback::FallbackPolicy;
use crate::analysis::fields::{FieldConfidences, FieldExtractor};
use crate::analysis::pipeline::{Pipeline, ResumeFallback};
use crate::config::Config;
use crate::extraction::{ImageCrateDecoder, LocalTextExtractor, TesseractOcr};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Candidate AI API v{}", env!("CARGO_PKG_VERSION"));

    // Document collaborators
    let ocr = TesseractOcr::new(config.tesseract_cmd.clone(), config.tesseract_lang.clone());
    info!(
        "OCR backend: {} (lang: {})",
        config.tesseract_cmd, config.tesseract_lang
    );
    let text_extractor = Arc::new(LocalTextExtractor::new(ocr));
    let image_decoder = Arc::new(ImageCrateDecoder);

    // Analysis pipeline (built-in skill vocabulary unless SKILL_VOCABULARY is set)
    let mut pipeline = Pipeline::new(text_extractor, image_decoder);
    if let Some(skills) = &config.skill_vocabulary {
        let fields = FieldExtractor::new(skills, FieldConfidences::default());
        info!("Using custom skill vocabulary ({} entries)", fields.skills().len());
        pipeline = pipeline.with_field_extractor(fields);
    }
    if !config.degrade_on_extraction_failure {
        info!("Extraction failures will be surfaced to callers (no placeholder results)");
        pipeline = pipeline
            .with_resume_fallback(ResumeFallback::propagate_all())
            .with_portfolio_fallback(FallbackPolicy::Propagate);
    }

    let state = AppState {
        config: config.clone(),
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
