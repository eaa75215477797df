//! Query parameter types for API handlers.

use scribe_core::types::DbId;
use serde::Deserialize;

/// `?prompt_id=` on `DELETE /projects/{project_id}/prompts`.
///
/// Optional at the type level so a missing value reaches the handler and
/// is reported as a 400 with a readable message.
#[derive(Debug, Deserialize)]
pub struct PromptIdParams {
    pub prompt_id: Option<DbId>,
}
