//! The client-side "generate content" flow.

use std::sync::Arc;

use scribe_core::tokens::format_tokens;
use scribe_core::types::DbId;
use scribe_db::models::generated_content::GeneratedContent;

use crate::api::ScribeClient;
use crate::error::ClientError;
use crate::poller::{PollEvent, ProgressPoller};

impl ScribeClient {
    /// Regenerate all content for a project while reporting progress.
    ///
    /// 1. Ask the server whether the project is eligible; refuse with
    ///    [`ClientError::NotEligible`] otherwise.
    /// 2. Clear existing generated content.
    /// 3. Poll the content list (expecting one row per prompt) while the
    ///    generation request is in flight, forwarding events to `on_event`.
    ///
    /// The poller is stopped whichever way the request ends. Returns the
    /// rows from the generation response.
    pub async fn run_generation(
        &self,
        project_id: DbId,
        mut on_event: impl FnMut(PollEvent),
    ) -> Result<Vec<GeneratedContent>, ClientError> {
        let report = self.eligibility(project_id).await?;
        if let Some(message) = report.outcome.message() {
            return Err(ClientError::NotEligible {
                message: message.to_string(),
            });
        }

        self.delete_generated(project_id).await?;

        let mut poller = ProgressPoller::new(Arc::new(self.clone()), project_id, report.prompt_count)
            .with_interval(self.poll_interval)
            .spawn();

        tracing::info!(
            %project_id,
            prompts = report.prompt_count,
            asset_tokens = %format_tokens(report.asset_tokens as usize),
            prompt_tokens = %format_tokens(report.prompt_tokens as usize),
            "Starting generation",
        );
        let start = self.start_generation(project_id);
        tokio::pin!(start);

        let result = loop {
            tokio::select! {
                result = &mut start => break result,
                Some(event) = poller.next_event() => on_event(event),
            }
        };

        while let Some(event) = poller.try_next_event() {
            on_event(event);
        }
        if let Err(e) = poller.stop().await {
            tracing::warn!(%project_id, error = %e, "Progress poller did not shut down cleanly");
        }

        match &result {
            Ok(rows) => tracing::info!(%project_id, rows = rows.len(), "Generation finished"),
            Err(e) => tracing::error!(%project_id, error = %e, "Generation failed"),
        }
        result
    }
}
