mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use minerva::models::SchemaVersion;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn router_lists_structured_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir, SchemaVersion::Structured);
    let pool = common::open_store(&config).await;
    let (app, state) = minerva::build_app(pool, config.schema);

    let response = app.oneshot(get("/endpoints")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["operation_id"], "getAllPosts");

    state.shutdown().await;
}

#[tokio::test]
async fn router_serves_welcome_and_health() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir, SchemaVersion::Flat);
    let pool = common::open_store(&config).await;
    let (app, state) = minerva::build_app(pool, config.schema);

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Welcome to Minerva BE" }));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    state.shutdown().await;
}

#[tokio::test]
async fn router_returns_not_found_for_unknown_route() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir, SchemaVersion::Structured);
    let pool = common::open_store(&config).await;
    let (app, state) = minerva::build_app(pool, config.schema);

    let response = app.oneshot(get("/endpoints/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    state.shutdown().await;
}
