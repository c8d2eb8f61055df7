use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `X-API-Key` header is missing or wrong.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        None => Err(AppError::Unauthorized(
            "API key missing. Send it in the X-API-Key header".to_string(),
        )),
        Some(key) if key != state.config.api_key => {
            Err(AppError::Unauthorized("Invalid API key".to_string()))
        }
        Some(_) => Ok(next.run(request).await),
    }
}
