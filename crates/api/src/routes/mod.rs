pub mod health;
pub mod project;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a Bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                          list, create
/// /projects/{project_id}                             get
/// /projects/{project_id}/assets                      list
/// /projects/{project_id}/prompts                     list, create, update, delete
/// /projects/{project_id}/import-template             import template prompts (POST)
/// /projects/{project_id}/generation-eligibility      eligibility report (GET)
/// /projects/{project_id}/generated-content           list, generate, edit, clear
///
/// /templates                                         list, create
/// /templates/{template_id}                           get, rename, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/templates", template::router())
}
