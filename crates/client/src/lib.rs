//! HTTP client for the Scribe API and client-side generation progress
//! tracking.

pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod session;

pub use api::ScribeClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use poller::{ContentSource, PollEvent, PollHandle, PollOutcome, ProgressPoller};
