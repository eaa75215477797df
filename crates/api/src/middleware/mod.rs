//! Request extractors applied before handlers run.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.

pub mod auth;
