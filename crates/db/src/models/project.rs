//! Project entity model and DTOs.

use scribe_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Title given to projects created without one.
pub const DEFAULT_PROJECT_TITLE: &str = "New Project";

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProject {
    /// Defaults to [`DEFAULT_PROJECT_TITLE`] if omitted.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
}
