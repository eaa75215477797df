//! Handlers for a project's generated content.
//!
//! `POST` runs the generation pipeline synchronously and returns the
//! stored rows; clients watch progress by polling `GET`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::generated_content::{GeneratedContent, UpdateGeneratedContent};
use scribe_db::repositories::GeneratedContentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::eligibility::report_for;
use crate::handlers::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/generated-content
///
/// Rows sorted by ascending `order`.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<GeneratedContent>>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let rows = GeneratedContentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// POST /api/v1/projects/{project_id}/generated-content
///
/// Re-checks eligibility server-side, then runs generation for every
/// prompt. Responds 201 with the stored rows.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Vec<GeneratedContent>>)> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;

    let report = report_for(&state, project_id).await?;
    if let Some(message) = report.outcome.message() {
        tracing::info!(%project_id, reason = message, "Generation refused: project not eligible");
        return Err(AppError::Core(CoreError::Validation(message.to_string())));
    }

    let rows = state
        .orchestrator
        .generate(project_id, &user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(rows)))
}

/// DELETE /api/v1/projects/{project_id}/generated-content
pub async fn clear(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let removed = GeneratedContentRepo::delete_by_project(&state.pool, project_id).await?;
    tracing::debug!(%project_id, removed, "Generated content cleared");
    Ok(Json(MessageResponse {
        message: "Generated content deleted successfully",
    }))
}

/// PATCH /api/v1/projects/{project_id}/generated-content
///
/// Replaces the `result` text of one row.
pub async fn update_result(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateGeneratedContent>,
) -> AppResult<Json<GeneratedContent>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let row = GeneratedContentRepo::update_result(&state.pool, project_id, input.id, &input.result)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generated content",
            id: input.id,
        }))?;
    Ok(Json(row))
}
