#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use marketing_api::config::{CorsOrigins, ServerConfig};
use marketing_api::router::build_app_router;
use marketing_api::state::AppState;
use marketing_db::{DbPool, PoolConfig};

/// Build a test `ServerConfig` with safe defaults (any CORS origin).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        database_url: String::new(),
        pool: PoolConfig::default(),
    }
}

/// Bootstrap the schema on the per-test database and build the full
/// application router, so tests exercise the production middleware stack.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let pool = DbPool::from_pool(pool, &config.pool);
    marketing_db::schema::initialize_schema(&pool)
        .await
        .expect("schema initialization should succeed");

    build_app_router(AppState { pool }, &config)
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// POST a raw, possibly malformed JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    post_with_content_type(app, uri, Some("application/json"), body).await
}

/// POST a raw body with an arbitrary (or no) content type.
pub async fn post_with_content_type(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
