//! Repository for the `assets` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{Asset, CreateAsset};

const COLUMNS: &str = "id, project_id, title, file_name, file_url, file_type, mime_type, \
    size, content, token_count, created_at, updated_at";

/// Read access to uploaded assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Register an asset row. Uploads normally arrive through the external
    /// upload service; this exists for imports and fixtures.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets
                (project_id, title, file_name, file_url, file_type, mime_type, size, content, token_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .bind(&input.file_type)
            .bind(&input.mime_type)
            .bind(input.size)
            .bind(&input.content)
            .bind(input.token_count)
            .fetch_one(pool)
            .await
    }

    /// List a project's assets in upload order.
    ///
    /// This order is also the order in which asset content is concatenated
    /// into the shared generation context.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
