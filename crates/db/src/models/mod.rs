//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs, validated with `validator` where the
//!   handler accepts user input

pub mod asset;
pub mod generated_content;
pub mod project;
pub mod prompt;
pub mod template;
