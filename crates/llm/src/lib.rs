//! Language-model provider adapter.
//!
//! - [`generator`] -- the [`TextGenerator`] seam the orchestrator calls.
//! - [`openai`] -- OpenAI-compatible chat completions client.
//! - [`error`] -- [`ProviderError`] and the retryable/fatal classification.
//! - [`config`] -- provider configuration from the environment.

pub mod config;
pub mod error;
pub mod generator;
pub mod openai;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use generator::{GenerationRequest, TextGenerator};
pub use openai::OpenAiClient;
