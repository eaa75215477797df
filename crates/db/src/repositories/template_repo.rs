//! Repository for the `templates` and `template_prompts` tables.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{
    CreateTemplate, CreateTemplatePrompt, Template, TemplatePrompt, UpdateTemplate,
};

const COLUMNS: &str = "id, user_id, title, description, created_at, updated_at";

const PROMPT_COLUMNS: &str =
    r#"id, template_id, name, prompt, token_count, "order", created_at, updated_at"#;

/// Access to prompt templates. Shared templates (`user_id IS NULL`) are
/// readable by everyone but writable by no one through this API.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template. `user_id = None` creates a shared template.
    pub async fn create(
        pool: &PgPool,
        user_id: Option<&str>,
        input: &CreateTemplate,
    ) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (user_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Templates visible to `user_id`: their own plus shared ones.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates
             WHERE user_id = $1 OR user_id IS NULL
             ORDER BY updated_at, id"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a template visible to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates
             WHERE id = $1 AND (user_id = $2 OR user_id IS NULL)"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a template owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET title = $3, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a prompt to a template.
    pub async fn add_prompt(
        pool: &PgPool,
        template_id: DbId,
        input: &CreateTemplatePrompt,
    ) -> Result<TemplatePrompt, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO template_prompts (template_id, name, prompt, token_count, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {PROMPT_COLUMNS}"#
        );
        sqlx::query_as::<_, TemplatePrompt>(&query)
            .bind(template_id)
            .bind(&input.name)
            .bind(&input.prompt)
            .bind(input.token_count)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// A template's prompts ordered by `order`.
    pub async fn list_prompts(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Vec<TemplatePrompt>, sqlx::Error> {
        let query = format!(
            r#"SELECT {PROMPT_COLUMNS} FROM template_prompts
               WHERE template_id = $1
               ORDER BY "order", created_at, id"#
        );
        sqlx::query_as::<_, TemplatePrompt>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await
    }
}
