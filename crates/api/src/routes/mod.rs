pub mod contact;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                 list, create
/// /projects/{id}            get, update, delete
/// /contact                  submit (POST)
/// /contacts                 list (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .merge(contact::router())
}
