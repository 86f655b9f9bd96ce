use std::sync::Arc;

use crate::config::Config;
use crate::gateway::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model gateway. Selected at startup via `LLM_PROVIDER`.
    pub gateway: Arc<dyn ModelGateway>,
    pub config: Config,
}
