//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod asset_repo;
pub mod generated_content_repo;
pub mod project_repo;
pub mod prompt_repo;
pub mod template_repo;

pub use asset_repo::AssetRepo;
pub use generated_content_repo::GeneratedContentRepo;
pub use project_repo::ProjectRepo;
pub use prompt_repo::PromptRepo;
pub use template_repo::TemplateRepo;
