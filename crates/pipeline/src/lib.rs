//! Content generation pipeline.
//!
//! Turns a project's assets and prompts into generated content: one
//! provider call chain per prompt, run concurrently, with ordered fallback
//! across models and a single transactional write of the results.

pub mod config;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod single_flight;

pub use config::GenerationConfig;
pub use error::PipelineError;
pub use orchestrator::GenerationOrchestrator;
pub use single_flight::{RunGuard, RunRegistry};
