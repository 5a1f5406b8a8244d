//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, post_raw, send};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = false)]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert!(json["pool"]["connections"].as_u64().unwrap() >= 1);
    assert!(json["pool"]["admission_available"].is_null());
}

#[sqlx::test(migrations = false)]
async fn health_check_reports_unreachable_database_as_503(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    pool.close().await;

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[sqlx::test(migrations = false)]
async fn unknown_route_returns_404_json(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Route not found"}));
}

#[sqlx::test(migrations = false)]
async fn unsupported_method_on_known_path_returns_404_json(pool: PgPool) {
    let app = build_test_app(pool).await;

    for (method, uri) in [
        (Method::PATCH, "/api/projects/1"),
        (Method::POST, "/api/contacts"),
        (Method::DELETE, "/api/projects"),
        (Method::PUT, "/health"),
    ] {
        let response = send(app.clone(), method.clone(), uri, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Route not found"}),
            "{method} {uri}"
        );
    }
}

#[sqlx::test(migrations = false)]
async fn malformed_json_body_returns_400(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_raw(app, "/api/projects", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"errors": [{"field": "body", "message": "Request body is not valid JSON"}]})
    );
}

#[sqlx::test(migrations = false)]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );
    assert_eq!(request_id.unwrap().to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = false)]
async fn cors_allows_any_origin(pool: PgPool) {
    let app = build_test_app(pool).await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/projects")
        .header("origin", "https://somewhere.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[sqlx::test(migrations = false)]
async fn cors_preflight_mirrors_requested_headers(pool: PgPool) {
    let app = build_test_app(pool).await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header("origin", "https://somewhere.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,x-requested-with")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allowed = response
        .headers()
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("x-requested-with"), "allowed: {allowed}");
    assert!(allowed.contains("content-type"), "allowed: {allowed}");
}
