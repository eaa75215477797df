pub mod asset;
pub mod eligibility;
pub mod generation;
pub mod project;
pub mod prompt;
pub mod template;

use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::project::Project;
use scribe_db::repositories::ProjectRepo;
use scribe_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a project owned by `user_id`, or 404.
///
/// Every project-scoped handler goes through this before touching child
/// rows, so another user's project is indistinguishable from a missing one.
pub(crate) async fn ensure_project(
    pool: &DbPool,
    project_id: DbId,
    user_id: &str,
) -> AppResult<Project> {
    ProjectRepo::find_for_user(pool, project_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}
