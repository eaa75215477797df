//! Response bodies shared by several handlers.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement for bulk operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
