//! Contact submission model.

use marketing_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}
