use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text generator. Production wires the OpenAI client; tests
    /// substitute a stub.
    pub generator: Arc<dyn TextGenerator>,
}
