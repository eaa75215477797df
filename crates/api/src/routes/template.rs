//! Route definitions for the `/templates` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{template_id}     -> get_by_id (with prompts)
/// PATCH  /{template_id}     -> update
/// DELETE /{template_id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(template::list).post(template::create))
        .route(
            "/{template_id}",
            get(template::get_by_id)
                .patch(template::update)
                .delete(template::delete),
        )
}
