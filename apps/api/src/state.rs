use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is mutated per request; the only lazily written value is the
/// memoized API key inside the LLM client's secret accessor.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
}
