//! Generation run orchestration.
//!
//! A run:
//! 1. Claims the project's run slot (one run per project at a time).
//! 2. Loads the project, its assets and its prompts.
//! 3. Builds the shared context from asset contents.
//! 4. Generates every prompt concurrently, each walking the model list
//!    until one succeeds.
//! 5. Replaces the project's generated content in one transaction.
//!
//! Steps 2-5 run under a wall-clock budget. Any failure leaves the
//! content store untouched.

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use scribe_core::types::DbId;
use scribe_db::models::generated_content::{CreateGeneratedContent, GeneratedContent};
use scribe_db::models::prompt::Prompt;
use scribe_db::repositories::{AssetRepo, GeneratedContentRepo, ProjectRepo, PromptRepo};
use scribe_llm::{GenerationRequest, ProviderError, TextGenerator};
use sqlx::PgPool;

use crate::config::GenerationConfig;
use crate::context::{shared_context, system_instruction, user_instruction};
use crate::error::PipelineError;
use crate::single_flight::RunRegistry;

/// Drives generation runs. Held in application state as
/// `Arc<GenerationOrchestrator>`.
pub struct GenerationOrchestrator {
    pool: PgPool,
    generator: Arc<dyn TextGenerator>,
    config: GenerationConfig,
    runs: RunRegistry,
}

impl GenerationOrchestrator {
    pub fn new(pool: PgPool, generator: Arc<dyn TextGenerator>, config: GenerationConfig) -> Self {
        Self {
            pool,
            generator,
            config,
            runs: RunRegistry::new(),
        }
    }

    /// Whether a run for `project_id` is currently in flight.
    pub fn is_running(&self, project_id: DbId) -> bool {
        self.runs.is_running(project_id)
    }

    /// Number of runs currently in flight across all projects.
    pub fn active_runs(&self) -> usize {
        self.runs.active()
    }

    /// Models each prompt is fanned out to, in attempt order.
    pub fn models(&self) -> &[String] {
        &self.config.models
    }

    /// Generate content for every prompt of a project owned by `user_id`.
    ///
    /// Returns the stored rows sorted by `order`. On any error nothing is
    /// written and previously generated content is left as it was.
    pub async fn generate(
        &self,
        project_id: DbId,
        user_id: &str,
    ) -> Result<Vec<GeneratedContent>, PipelineError> {
        let _guard = self
            .runs
            .try_acquire(project_id)
            .ok_or(PipelineError::AlreadyRunning(project_id))?;

        let budget = self.config.max_duration;
        let started = Instant::now();

        let outcome = match tokio::time::timeout(budget, self.run(project_id, user_id)).await {
            Ok(result) => result,
            Err(_) => Err(PipelineError::Timeout(budget)),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(rows) => tracing::info!(
                %project_id,
                generated = rows.len(),
                elapsed_ms,
                "Generation run complete",
            ),
            Err(e) => tracing::error!(
                %project_id,
                error = %e,
                elapsed_ms,
                "Generation run failed",
            ),
        }
        outcome
    }

    async fn run(
        &self,
        project_id: DbId,
        user_id: &str,
    ) -> Result<Vec<GeneratedContent>, PipelineError> {
        ProjectRepo::find_for_user(&self.pool, project_id, user_id)
            .await?
            .ok_or(PipelineError::ProjectNotFound(project_id))?;

        let assets = AssetRepo::list_by_project(&self.pool, project_id).await?;
        let prompts = PromptRepo::list_by_project(&self.pool, project_id).await?;
        let context = shared_context(&assets);

        tracing::info!(
            %project_id,
            assets = assets.len(),
            prompts = prompts.len(),
            models = ?self.config.models,
            "Starting generation run",
        );

        // All prompt futures exist before any is polled; the first error
        // drops the rest.
        let rows = try_join_all(prompts.iter().map(|p| self.generate_prompt(p, &context))).await?;

        let stored = GeneratedContentRepo::replace_for_project(&self.pool, project_id, &rows).await?;
        Ok(stored)
    }

    /// Walk the model list for one prompt.
    async fn generate_prompt(
        &self,
        prompt: &Prompt,
        context: &str,
    ) -> Result<CreateGeneratedContent, PipelineError> {
        let mut request = GenerationRequest {
            model: String::new(),
            system: system_instruction(context, &prompt.prompt),
            user: user_instruction(context, &prompt.prompt),
        };

        for model in &self.config.models {
            request.model.clone_from(model);
            match self.generator.generate(&request).await {
                Ok(result) => {
                    tracing::debug!(
                        prompt_id = %prompt.id,
                        prompt = %prompt.name,
                        model = %model,
                        chars = result.len(),
                        "Prompt generated",
                    );
                    return Ok(CreateGeneratedContent {
                        prompt_id: Some(prompt.id),
                        name: prompt.name.clone(),
                        result,
                        order: prompt.order,
                    });
                }
                Err(err @ ProviderError::Retryable { .. }) => {
                    tracing::warn!(
                        prompt = %prompt.name,
                        model = %model,
                        error = %err,
                        "Model unavailable, falling back",
                    );
                }
                Err(err) => {
                    return Err(PipelineError::Provider {
                        prompt: prompt.name.clone(),
                        source: err,
                    });
                }
            }
        }

        Err(PipelineError::ModelsExhausted {
            prompt: prompt.name.clone(),
        })
    }
}
