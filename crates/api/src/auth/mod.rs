//! Authentication primitives.
//!
//! - [`jwt`] -- verification of access tokens issued by the identity provider.

pub mod jwt;
