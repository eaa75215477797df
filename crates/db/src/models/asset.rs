//! Asset entity model.
//!
//! Assets are uploaded and processed by external services; the backend
//! reads their extracted `content` and `token_count`.

use scribe_core::eligibility::AssetSummary;
use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Asset {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub file_name: String,
    pub file_url: String,
    /// Content kind tag (`text`, `markdown`, `audio`, `video`, ...).
    pub file_type: String,
    pub mime_type: String,
    pub size: i64,
    /// Extracted text; `None` until extraction has run.
    pub content: Option<String>,
    pub token_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Asset {
    /// The fields the eligibility rules look at.
    pub fn summary(&self) -> AssetSummary {
        AssetSummary::new(self.content.as_deref(), self.token_count)
    }
}

/// DTO for registering an asset row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub project_id: DbId,
    pub title: String,
    pub file_name: String,
    pub file_url: String,
    pub file_type: String,
    pub mime_type: String,
    pub size: i64,
    pub content: Option<String>,
    pub token_count: i32,
}
