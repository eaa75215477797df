//! Client-side progress tracking for a generation run.
//!
//! The server returns generated content only once a run has finished, so
//! the client polls the content list while the `POST` is in flight and
//! reports how many rows exist against how many prompts were submitted.
//! The poller stops as soon as the two match, or when cancelled.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use scribe_core::types::DbId;
use scribe_db::models::generated_content::GeneratedContent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::ClientError;

/// Default delay between fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest delay the poller will use; `tokio::time::interval` rejects zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Anything that can list a project's generated content.
pub trait ContentSource: Send + Sync {
    fn fetch_generated(
        &self,
        project_id: DbId,
    ) -> impl Future<Output = Result<Vec<GeneratedContent>, ClientError>> + Send;
}

/// Progress notifications emitted while polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    Progress { generated: usize, total: usize },
    FetchFailed { message: String },
    Completed { count: usize },
}

/// How a poll loop ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The fetched row count reached the expected total.
    Completed(Vec<GeneratedContent>),
    Cancelled,
}

// ---------------------------------------------------------------------------
// ProgressPoller
// ---------------------------------------------------------------------------

pub struct ProgressPoller<S> {
    source: Arc<S>,
    project_id: DbId,
    expected_total: usize,
    interval: Duration,
}

impl<S: ContentSource> ProgressPoller<S> {
    pub fn new(source: Arc<S>, project_id: DbId, expected_total: usize) -> Self {
        Self {
            source,
            project_id,
            expected_total,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the delay between fetches, floored at [`MIN_POLL_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Poll until the expected number of rows exists or `cancel` fires.
    ///
    /// The first fetch happens immediately. A failed fetch is reported and
    /// the loop keeps going. Events are dropped silently once the receiver
    /// is gone.
    pub async fn run(
        &self,
        cancel: CancellationToken,
        events: mpsc::UnboundedSender<PollEvent>,
    ) -> PollOutcome {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::debug!(
            project_id = %self.project_id,
            expected_total = self.expected_total,
            interval_ms = self.interval.as_millis() as u64,
            "Progress polling started",
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.source.fetch_generated(self.project_id) => result,
            };

            match fetched {
                Ok(items) => {
                    let generated = items.len();
                    let _ = events.send(PollEvent::Progress {
                        generated,
                        total: self.expected_total,
                    });
                    if generated == self.expected_total {
                        tracing::debug!(project_id = %self.project_id, generated, "Progress polling complete");
                        let _ = events.send(PollEvent::Completed { count: generated });
                        return PollOutcome::Completed(items);
                    }
                }
                Err(e) => {
                    tracing::warn!(project_id = %self.project_id, error = %e, "Progress fetch failed");
                    let _ = events.send(PollEvent::FetchFailed {
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(project_id = %self.project_id, "Progress polling cancelled");
        PollOutcome::Cancelled
    }
}

impl<S: ContentSource + 'static> ProgressPoller<S> {
    /// Run the poll loop on its own task.
    pub fn spawn(self) -> PollHandle {
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let token = cancel.clone();
        let task = tokio::spawn(async move { self.run(token, tx).await });

        PollHandle {
            events: rx,
            task,
            cancel: cancel.clone(),
            _guard: cancel.drop_guard(),
        }
    }
}

// ---------------------------------------------------------------------------
// PollHandle
// ---------------------------------------------------------------------------

/// Owner of a spawned poll loop. Dropping the handle stops polling.
pub struct PollHandle {
    events: mpsc::UnboundedReceiver<PollEvent>,
    task: JoinHandle<PollOutcome>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl PollHandle {
    /// Next event, or `None` once the loop has ended and all events
    /// were received.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }

    /// An already-queued event, if any.
    pub fn try_next_event(&mut self) -> Option<PollEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the loop to end on its own.
    pub async fn wait(self) -> Result<PollOutcome, ClientError> {
        let PollHandle {
            task, _guard: guard, ..
        } = self;
        let outcome = task.await?;
        drop(guard);
        Ok(outcome)
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(self) -> Result<PollOutcome, ClientError> {
        self.cancel.cancel();
        Ok(self.task.await?)
    }
}
