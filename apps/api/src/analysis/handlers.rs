//! Axum route handlers for the AI API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::analysis::cancel::CancelSignal;
use crate::errors::AppError;
use crate::models::catalog::ModelCatalogEntry;
use crate::models::matching::{MatchRequest, MatchResult};
use crate::models::portfolio::ClassifyPortfolioResult;
use crate::models::resume::OcrResumeResult;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

/// POST /api/v1/ai/ocr-resume
///
/// Multipart upload (`file`) of a PDF, image or plain-text résumé. Returns
/// the extracted text, structured fields and section flags.
pub async fn handle_ocr_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResumeResult>, AppError> {
    let (file_name, bytes) = read_upload(multipart).await?;
    let cancel = CancelSignal::with_timeout(state.config.extraction_timeout);

    let result = state
        .pipeline
        .extract_resume(&file_name, bytes, &cancel)
        .await?;

    Ok(Json(result))
}

/// POST /api/v1/ai/classify-portfolio
///
/// Multipart upload (`file`) of a portfolio image. Returns heuristic regions.
pub async fn handle_classify_portfolio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ClassifyPortfolioResult>, AppError> {
    let (file_name, bytes) = read_upload(multipart).await?;
    let cancel = CancelSignal::with_timeout(state.config.extraction_timeout);

    let result = state
        .pipeline
        .classify_portfolio(&file_name, bytes, &cancel)
        .await?;

    Ok(Json(result))
}

/// POST /api/v1/ai/match-summary
///
/// Scores a résumé against a job description.
pub async fn handle_match_summary(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = state.pipeline.match_documents(&request)?;
    Ok(Json(result))
}

/// GET /api/v1/ai/models
pub async fn handle_list_models(State(state): State<AppState>) -> Json<Vec<ModelCatalogEntry>> {
    Json(state.pipeline.models().to_vec())
}

/// Returns the name and content of the `file` field. Other fields are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Malformed multipart body", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| upload_error("Could not read upload", e))?;

        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        debug!("Received upload {file_name} ({} bytes)", data.len());
        return Ok((file_name, data));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// Oversized bodies keep their 413; anything else is a malformed request.
fn upload_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("{context}: {}", e.body_text()))
    }
}
