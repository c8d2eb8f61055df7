use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "candidate-ai-api"
    }))
}

/// GET /
/// Describes the service and where its endpoints live.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "Candidate AI API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "ai": "/api/v1/ai"
        }
    }))
}
