//! Repository for the `generated_content` table (the content store).
//!
//! Rows are only ever presented in `order` sequence; insertion order of
//! concurrent generations carries no meaning.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::generated_content::{CreateGeneratedContent, GeneratedContent};

const COLUMNS: &str =
    r#"id, project_id, prompt_id, name, result, "order", created_at, updated_at"#;

/// Provides content store operations for generated content.
pub struct GeneratedContentRepo;

impl GeneratedContentRepo {
    /// Insert a single row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateGeneratedContent,
    ) -> Result<GeneratedContent, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO generated_content (project_id, prompt_id, name, result, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, GeneratedContent>(&query)
            .bind(project_id)
            .bind(input.prompt_id)
            .bind(&input.name)
            .bind(&input.result)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// All rows of a project sorted by ascending `order`.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<GeneratedContent>, sqlx::Error> {
        let query = format!(
            r#"SELECT {COLUMNS} FROM generated_content
               WHERE project_id = $1
               ORDER BY "order", created_at, id"#
        );
        sqlx::query_as::<_, GeneratedContent>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Number of rows currently stored for a project.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM generated_content WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Delete every row of a project. Returns the number of rows removed.
    pub async fn delete_by_project(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM generated_content WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Atomically replace a project's content with `rows`.
    ///
    /// Clears existing rows and inserts the new ones in one transaction, so
    /// readers see either the previous set or the complete new set. Also
    /// bumps the project's `updated_at`. Returns the inserted rows sorted
    /// by `order`.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: DbId,
        rows: &[CreateGeneratedContent],
    ) -> Result<Vec<GeneratedContent>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cleared = sqlx::query("DELETE FROM generated_content WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let query = format!(
            r#"INSERT INTO generated_content (project_id, prompt_id, name, result, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        );
        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let created = sqlx::query_as::<_, GeneratedContent>(&query)
                .bind(project_id)
                .bind(row.prompt_id)
                .bind(&row.name)
                .bind(&row.result)
                .bind(row.order)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(created);
        }

        sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            %project_id,
            cleared,
            inserted = inserted.len(),
            "Replaced generated content",
        );

        inserted.sort_by_key(|row| row.order);
        Ok(inserted)
    }

    /// Replace the `result` text of one row. Returns `None` if no row with
    /// `id` exists within `project_id`.
    pub async fn update_result(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        result: &str,
    ) -> Result<Option<GeneratedContent>, sqlx::Error> {
        let query = format!(
            "UPDATE generated_content SET result = $3, updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedContent>(&query)
            .bind(id)
            .bind(project_id)
            .bind(result)
            .fetch_optional(pool)
            .await
    }
}
