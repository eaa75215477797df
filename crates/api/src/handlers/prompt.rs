//! Handlers for a project's prompts and template import.
//!
//! Token counts are never accepted from the client: they are recomputed
//! from the prompt text on every create, update and import.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::prompt::{CreatePrompt, NewPrompt, Prompt, UpdatePrompt};
use scribe_db::models::template::ImportTemplate;
use scribe_db::repositories::{PromptRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::query::PromptIdParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/prompts
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Prompt>>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let prompts = PromptRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(prompts))
}

/// POST /api/v1/projects/{project_id}/prompts
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreatePrompt>,
) -> AppResult<(StatusCode, Json<Prompt>)> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let token_count = state.tokens.count_for_storage(&input.prompt);
    let prompt = PromptRepo::create(&state.pool, project_id, &input, token_count).await?;
    tracing::debug!(%project_id, prompt_id = %prompt.id, token_count, "Prompt created");
    Ok((StatusCode::CREATED, Json(prompt)))
}

/// PATCH /api/v1/projects/{project_id}/prompts
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdatePrompt>,
) -> AppResult<Json<Prompt>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let token_count = state.tokens.count_for_storage(&input.prompt);
    let prompt = PromptRepo::update(&state.pool, project_id, &input, token_count)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: input.id,
        }))?;
    Ok(Json(prompt))
}

/// DELETE /api/v1/projects/{project_id}/prompts?prompt_id=
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<PromptIdParams>,
) -> AppResult<Json<MessageResponse>> {
    let prompt_id = params
        .prompt_id
        .ok_or_else(|| AppError::BadRequest("Prompt ID is required".into()))?;
    ensure_project(&state.pool, project_id, &user.user_id).await?;

    if !PromptRepo::delete(&state.pool, project_id, prompt_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        }));
    }
    Ok(Json(MessageResponse {
        message: "Prompt deleted successfully",
    }))
}

/// POST /api/v1/projects/{project_id}/import-template
///
/// Appends the template's prompts, in template order, after the project's
/// existing prompts.
pub async fn import_template(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<ImportTemplate>,
) -> AppResult<(StatusCode, Json<Vec<Prompt>>)> {
    let template_id = input
        .template_id
        .ok_or_else(|| AppError::BadRequest("Template ID is required".into()))?;
    ensure_project(&state.pool, project_id, &user.user_id).await?;

    TemplateRepo::find_for_user(&state.pool, template_id, &user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id: template_id,
        }))?;

    let new_prompts: Vec<NewPrompt> = TemplateRepo::list_prompts(&state.pool, template_id)
        .await?
        .into_iter()
        .map(|tp| NewPrompt {
            token_count: state.tokens.count_for_storage(&tp.prompt),
            name: tp.name,
            prompt: tp.prompt,
        })
        .collect();

    let inserted = PromptRepo::append_batch(&state.pool, project_id, &new_prompts).await?;
    tracing::info!(
        %project_id,
        %template_id,
        imported = inserted.len(),
        "Template imported",
    );
    Ok((StatusCode::CREATED, Json(inserted)))
}
