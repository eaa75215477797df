//! Generation eligibility for a project.

use axum::extract::{Path, State};
use axum::Json;
use scribe_core::eligibility::{evaluate, AssetSummary, EligibilityReport};
use scribe_core::types::DbId;
use scribe_db::repositories::{AssetRepo, PromptRepo};

use crate::error::AppResult;
use crate::handlers::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Evaluate eligibility from the project's current assets and prompts.
///
/// The caller is responsible for the ownership check.
pub(crate) async fn report_for(state: &AppState, project_id: DbId) -> AppResult<EligibilityReport> {
    let assets = AssetRepo::list_by_project(&state.pool, project_id).await?;
    let prompts = PromptRepo::list_by_project(&state.pool, project_id).await?;

    let summaries: Vec<AssetSummary> = assets.iter().map(|a| a.summary()).collect();
    let texts: Vec<&str> = prompts.iter().map(|p| p.prompt.as_str()).collect();

    Ok(evaluate(
        &summaries,
        &texts,
        &state.config.token_limits,
        &state.tokens,
    ))
}

/// GET /api/v1/projects/{project_id}/generation-eligibility
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<EligibilityReport>> {
    ensure_project(&state.pool, project_id, &user.user_id).await?;
    let report = report_for(&state, project_id).await?;
    Ok(Json(report))
}
