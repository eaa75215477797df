//! Repository for the `prompts` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt::{CreatePrompt, NewPrompt, Prompt, UpdatePrompt};

const COLUMNS: &str =
    r#"id, project_id, name, prompt, token_count, "order", created_at, updated_at"#;

/// Provides CRUD operations for a project's prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a prompt. `token_count` is computed by the caller from `input.prompt`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreatePrompt,
        token_count: i32,
    ) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO prompts (project_id, name, prompt, token_count, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.prompt)
            .bind(token_count)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// List a project's prompts by `order`, ties broken by creation time.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            r#"SELECT {COLUMNS} FROM prompts
               WHERE project_id = $1
               ORDER BY "order", created_at, id"#
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a prompt's editable fields. Returns `None` if the prompt does
    /// not exist within `project_id`.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        input: &UpdatePrompt,
        token_count: i32,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            r#"UPDATE prompts SET
                   name = $3,
                   prompt = $4,
                   token_count = $5,
                   "order" = $6,
                   updated_at = NOW()
               WHERE id = $1 AND project_id = $2
               RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.prompt)
            .bind(token_count)
            .bind(input.order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a prompt. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append prompts after the project's existing ones.
    ///
    /// Each new prompt gets `order = existing_count + index`. The count and
    /// the inserts share one transaction.
    pub async fn append_batch(
        pool: &PgPool,
        project_id: DbId,
        prompts: &[NewPrompt],
    ) -> Result<Vec<Prompt>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (existing,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM prompts WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&mut *tx)
                .await?;
        let start = i32::try_from(existing).unwrap_or(i32::MAX);

        let query = format!(
            r#"INSERT INTO prompts (project_id, name, prompt, token_count, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        );
        let mut inserted = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            let row = sqlx::query_as::<_, Prompt>(&query)
                .bind(project_id)
                .bind(&prompt.name)
                .bind(&prompt.prompt)
                .bind(prompt.token_count)
                .bind(start.saturating_add(index as i32))
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
