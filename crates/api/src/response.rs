//! Small fixed-shape response bodies.

use marketing_core::types::DbId;
use serde::Serialize;

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "id": ..., "message": ... }` acknowledgement for a stored record.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
    pub message: &'static str,
}
