use std::sync::Arc;

use crate::config::Config;
use crate::filters::vocab::Vocabulary;
use crate::llm_client::LlmClient;
use crate::search::client::SearchBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<LlmClient>,
    /// Pluggable search backend. Production wires the Crustdata client; tests
    /// substitute a mock.
    pub search: Arc<dyn SearchBackend>,
    /// Static controlled vocabularies, built once at startup.
    pub vocab: Arc<Vocabulary>,
    pub config: Config,
}
