pub mod contact;
pub mod project;

use crate::error::AppError;

/// Fallback for any path no route matched.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
