use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionApi;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Production: `OpenAiClient`.
    pub llm: Arc<dyn CompletionApi>,
    /// Runtime configuration; not yet consumed by any handler.
    #[allow(dead_code)]
    pub config: Config,
}
