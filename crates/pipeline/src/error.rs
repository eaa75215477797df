use std::time::Duration;

use scribe_core::types::DbId;
use scribe_llm::ProviderError;

/// Why a generation run failed. Any variant means nothing was written.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The project does not exist or belongs to another user.
    #[error("Project {0} not found")]
    ProjectNotFound(DbId),

    /// A model returned a non-retryable failure while generating `prompt`.
    #[error("Generation failed for prompt '{prompt}': {source}")]
    Provider {
        prompt: String,
        #[source]
        source: ProviderError,
    },

    /// Every configured model failed with a retryable error for `prompt`.
    #[error("All models failed for prompt '{prompt}'")]
    ModelsExhausted { prompt: String },

    /// The run exceeded its wall-clock budget.
    #[error("Generation did not finish within {0:?}")]
    Timeout(Duration),

    /// Another run for the same project is in flight.
    #[error("Generation already running for project {0}")]
    AlreadyRunning(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
