//! Domain types and pure logic shared by every Scribe crate.
//!
//! Nothing in here touches the database or the network: token accounting
//! and the generation eligibility rules operate on data the caller has
//! already loaded.

pub mod eligibility;
pub mod error;
pub mod tokens;
pub mod types;
