use std::sync::Arc;

use crate::config::Config;
use crate::embedding::EmbeddingClient;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Constructed once at startup; immutable thereafter.
#[derive(Clone)]
pub struct AppState {
    /// Generative backend behind the `TextGenerator` seam — the real Gemini
    /// client in production, scripted doubles in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub embedder: EmbeddingClient,
    /// Kept for handlers that need runtime settings; currently read only at startup.
    #[allow(dead_code)]
    pub config: Config,
}
