//! Prompt entity model and DTOs.

use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Name given to prompts created without one.
pub const DEFAULT_PROMPT_NAME: &str = "New Prompt";

/// A row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub prompt: String,
    /// Derived from `prompt`; recomputed on every write.
    pub token_count: i32,
    /// Best-effort sort key, not enforced unique.
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_prompt_name() -> String {
    DEFAULT_PROMPT_NAME.to_string()
}

/// DTO for creating a prompt. Token counts are computed server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrompt {
    #[serde(default = "default_prompt_name")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

/// DTO for replacing a prompt's editable fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePrompt {
    pub id: DbId,
    #[serde(default = "default_prompt_name")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

/// A prompt to append to a project; its `order` is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub name: String,
    pub prompt: String,
    pub token_count: i32,
}
