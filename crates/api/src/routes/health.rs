//! Liveness probe, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use marketing_db::PoolStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub pool: PoolStatus,
}

/// GET /health -- 200 when a connection round-trips, 503 otherwise.
async fn report(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let db_healthy = match marketing_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        pool: state.pool.status(),
    };
    (code, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
