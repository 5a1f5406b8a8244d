//! Project entity model.

use marketing_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}
