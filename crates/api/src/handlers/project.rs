//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::types::DbId;
use scribe_db::models::project::{CreateProject, Project};
use scribe_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, &user.user_id, &input).await?;
    tracing::info!(project_id = %project.id, user_id = %user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// The caller's projects, most recently updated first.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, &user.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ensure_project(&state.pool, project_id, &user.user_id).await?;
    Ok(Json(project))
}
