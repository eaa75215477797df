//! Handlers for the `/templates` resource.
//!
//! Shared templates (no owner) are visible to every user but can only be
//! changed by their owner, so they are read-only through this API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::template::{CreateTemplate, Template, TemplateWithPrompts, UpdateTemplate};
use scribe_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Template",
        id,
    })
}

/// GET /api/v1/templates
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Template>>> {
    let templates = TemplateRepo::list_for_user(&state.pool, &user.user_id).await?;
    Ok(Json(templates))
}

/// POST /api/v1/templates
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateTemplate>,
) -> AppResult<(StatusCode, Json<Template>)> {
    let template = TemplateRepo::create(&state.pool, Some(&user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/templates/{template_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(template_id): Path<DbId>,
) -> AppResult<Json<TemplateWithPrompts>> {
    let template = TemplateRepo::find_for_user(&state.pool, template_id, &user.user_id)
        .await?
        .ok_or_else(|| not_found(template_id))?;
    let prompts = TemplateRepo::list_prompts(&state.pool, template_id).await?;
    Ok(Json(TemplateWithPrompts { template, prompts }))
}

/// PATCH /api/v1/templates/{template_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(template_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateTemplate>,
) -> AppResult<Json<Template>> {
    let template = TemplateRepo::update(&state.pool, template_id, &user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(template_id))?;
    Ok(Json(template))
}

/// DELETE /api/v1/templates/{template_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(template_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TemplateRepo::delete(&state.pool, template_id, &user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(template_id))
    }
}
