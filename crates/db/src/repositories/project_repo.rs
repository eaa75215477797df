//! Repository for the `projects` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, DEFAULT_PROJECT_TITLE};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, created_at, updated_at";

/// Provides user-scoped access to projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(input.title.as_deref().unwrap_or(DEFAULT_PROJECT_TITLE))
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, most recently updated first.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY updated_at DESC, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
