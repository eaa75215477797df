//! Template and template prompt models.

use scribe_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `templates` table. `user_id` is `None` for shared templates.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Template {
    pub id: DbId,
    pub user_id: Option<UserId>,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `template_prompts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TemplatePrompt {
    pub id: DbId,
    pub template_id: DbId,
    pub name: String,
    pub prompt: String,
    pub token_count: i32,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A template together with its prompts, ordered by `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWithPrompts {
    #[serde(flatten)]
    pub template: Template,
    pub prompts: Vec<TemplatePrompt>,
}

/// DTO for creating a template owned by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplate {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
}

/// DTO for renaming a template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
}

/// DTO for adding a prompt to a template.
#[derive(Debug, Clone)]
pub struct CreateTemplatePrompt {
    pub name: String,
    pub prompt: String,
    pub token_count: i32,
    pub order: i32,
}

/// Body of `POST /projects/{project_id}/import-template`.
///
/// `template_id` is optional here so its absence is reported as a readable
/// 400 rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportTemplate {
    pub template_id: Option<DbId>,
}
