use crate::config::Config;
use crate::llm_client::gateway::CompletionGateway;

/// Shared application state injected into all route handlers via Axum
/// extractors. The gateway is the single entry point to the provider; no
/// component holds mutable state across calls.
#[derive(Clone)]
pub struct AppState {
    pub gateway: CompletionGateway,
    /// Kept for handlers that need deployment settings later.
    #[allow(dead_code)]
    pub config: Config,
}
