use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marketing_core::error::CoreError;
use serde_json::json;

/// Message returned for every 500; details stay in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
///
/// - `{ "errors": [{ "field", "message" }, ...] }` for validation failures
/// - `{ "error": "..." }` for everything else
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marketing_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No route matched the request path.
    #[error("Route not found")]
    RouteNotFound,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Core(CoreError::NotFound { entity, .. }) => {
                error_body(StatusCode::NOT_FOUND, &format!("{entity} not found"))
            }
            AppError::RouteNotFound => error_body(StatusCode::NOT_FOUND, "Route not found"),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// The generic 500 response, also used for recovered panics.
pub fn internal_error() -> Response {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
