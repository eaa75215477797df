//! Handlers for project assets. Assets are written by the upload service;
//! this API only lists them.

use axum::extract::{Path, State};
use axum::Json;
use scribe_core::types::DbId;
use scribe_db::models::asset::Asset;
use scribe_db::repositories::AssetRepo;

use crate::error::AppResult;
use crate::handlers::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/assets
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Asset>>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let assets = AssetRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(assets))
}
