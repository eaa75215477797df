use std::sync::Arc;

use scribe_core::tokens::TokenCounter;
use scribe_pipeline::GenerationOrchestrator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scribe_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Generation run driver (provider, model list, run registry).
    pub orchestrator: Arc<GenerationOrchestrator>,
    /// Tokenizer used for prompt token counts and eligibility.
    pub tokens: Arc<TokenCounter>,
}
