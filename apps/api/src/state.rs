use std::sync::Arc;

use crate::analysis::pipeline::Pipeline;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless analysis pipeline, shared by every request.
    pub pipeline: Arc<Pipeline>,
}
