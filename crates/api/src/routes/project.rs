//! Route definitions for the `/projects` resource and its sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{asset, eligibility, generation, project, prompt};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{project_id}                            -> get_by_id
///
/// GET    /{project_id}/assets                     -> asset::list_by_project
///
/// GET    /{project_id}/prompts                    -> prompt::list_by_project
/// POST   /{project_id}/prompts                    -> prompt::create
/// PATCH  /{project_id}/prompts                    -> prompt::update
/// DELETE /{project_id}/prompts?prompt_id=         -> prompt::delete
/// POST   /{project_id}/import-template            -> prompt::import_template
///
/// GET    /{project_id}/generation-eligibility     -> eligibility::get
///
/// GET    /{project_id}/generated-content          -> generation::list
/// POST   /{project_id}/generated-content          -> generation::generate
/// PATCH  /{project_id}/generated-content          -> generation::update_result
/// DELETE /{project_id}/generated-content          -> generation::clear
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{project_id}", get(project::get_by_id))
        .route("/{project_id}/assets", get(asset::list_by_project))
        .route(
            "/{project_id}/prompts",
            get(prompt::list_by_project)
                .post(prompt::create)
                .patch(prompt::update)
                .delete(prompt::delete),
        )
        .route("/{project_id}/import-template", post(prompt::import_template))
        .route("/{project_id}/generation-eligibility", get(eligibility::get))
        .route(
            "/{project_id}/generated-content",
            get(generation::list)
                .post(generation::generate)
                .patch(generation::update_result)
                .delete(generation::clear),
        )
}
