//! Route definitions for contact submissions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// ```text
/// POST /contact     -> submit
/// GET  /contacts    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::submit))
        .route("/contacts", get(contact::list))
}
