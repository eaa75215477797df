//! Generated content entity model and DTOs.

use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `generated_content` table.
///
/// `prompt_id` links back to the originating prompt; `name` and `order`
/// are copies taken at generation time so later prompt edits do not
/// reshuffle existing output.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: DbId,
    pub project_id: DbId,
    pub prompt_id: Option<DbId>,
    pub name: String,
    pub result: String,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a generated content row.
#[derive(Debug, Clone)]
pub struct CreateGeneratedContent {
    pub prompt_id: Option<DbId>,
    pub name: String,
    pub result: String,
    pub order: i32,
}

/// Body of a manual edit: replaces `result` on one row.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGeneratedContent {
    pub id: DbId,
    #[validate(length(min = 1, message = "result must not be empty"))]
    pub result: String,
}
