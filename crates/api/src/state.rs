/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: marketing_db::DbPool,
}
