//! The text generation seam.

use async_trait::async_trait;

use crate::error::ProviderError;

/// One completion request against a single model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    /// System instruction carrying the shared project context.
    pub system: String,
    /// User instruction restating the prompt.
    pub user: String,
}

/// Produces text for a request, or a classified [`ProviderError`].
///
/// Implementations must be shareable across concurrently running prompt
/// tasks; the orchestrator holds one as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}
