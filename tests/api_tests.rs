mod common;

use reqwest::StatusCode;
use serde_json::json;

use minerva::models::SchemaVersion;

// ── Health & root ───────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = common::spawn_app().await;

    let (body, status) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to Minerva BE" }));

    common::cleanup(app).await;
}

#[tokio::test]
async fn responses_carry_nosniff_header() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/endpoints")).send().await.unwrap();
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    common::cleanup(app).await;
}

// ── Structured endpoints ────────────────────────────────────────

#[tokio::test]
async fn list_returns_seeded_endpoints_in_order() {
    let app = common::spawn_app().await;

    let (body, status) = app.get("/endpoints").await;
    assert_eq!(status, StatusCode::OK);

    let endpoints = body.as_array().expect("array body");
    assert_eq!(endpoints.len(), 3);

    let operation_ids: Vec<&str> = endpoints
        .iter()
        .map(|e| e["operation_id"].as_str().unwrap())
        .collect();
    assert_eq!(operation_ids, ["getAllUsers", "createPost", "getAllPosts"]);

    for endpoint in endpoints {
        assert!(endpoint["id"].is_i64());
        assert_eq!(endpoint["base_url"], "https://jsonplaceholder.typicode.com");
        assert_eq!(endpoint["cases"].as_array().unwrap().len(), 1);
    }

    common::cleanup(app).await;
}

#[tokio::test]
async fn list_preserves_nested_case_rows() {
    let app = common::spawn_app().await;

    let (body, _) = app.get("/endpoints").await;
    let users = &body[0];
    assert_eq!(users["operation_id"], "getAllUsers");
    assert_eq!(users["method"], "GET");
    assert_eq!(users["path"], "/users");

    let case = &users["cases"][0];
    assert_eq!(case["name"], "Basic retrieval");
    assert_eq!(
        case["request"]["headers"][0],
        json!({ "row_id": 1, "keyValue": "Accept", "value": "application/json", "enabled": true })
    );
    assert_eq!(case["request"]["path_params"], json!([]));
    assert_eq!(case["request"]["body"], json!(null));
    assert_eq!(case["response"]["status_code"], 200);
    assert!(case["response"]["body"]["data"].as_str().unwrap().contains("Leanne Graham"));

    let create_post = &body[1];
    assert_eq!(create_post["method"], "POST");
    assert_eq!(
        create_post["cases"][0]["request"]["body"],
        json!({ "title": "foo", "body": "bar", "userId": 1 })
    );
    assert_eq!(create_post["cases"][0]["response"]["status_code"], 201);

    common::cleanup(app).await;
}

#[tokio::test]
async fn client_prefix_serves_same_list() {
    let app = common::spawn_app().await;

    let (plain, _) = app.get("/endpoints").await;
    let (prefixed, status) = app.get("/api/endpoint-management/endpoints").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, prefixed);

    common::cleanup(app).await;
}

#[tokio::test]
async fn list_on_unseeded_store_is_empty_array() {
    let app = common::spawn_app_with(|c| c.seed = false).await;

    let (body, status) = app.get("/endpoints").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    common::cleanup(app).await;
}

// ── Flat endpoints ──────────────────────────────────────────────

#[tokio::test]
async fn flat_schema_lists_three_records() {
    let app = common::spawn_app_with(|c| c.schema = SchemaVersion::Flat).await;

    let (body, status) = app.get("/endpoints").await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().expect("array body");
    assert_eq!(records.len(), 3);

    let expected = [
        ("Get Users", "GET", "https://jsonplaceholder.typicode.com/users"),
        ("Create Post", "POST", "https://jsonplaceholder.typicode.com/posts"),
        ("Get Posts", "GET", "https://jsonplaceholder.typicode.com/posts"),
    ];
    for (record, (name, method, url)) in records.iter().zip(expected) {
        assert!(!record["id"].is_null());
        assert_eq!(record["name"], name);
        assert_eq!(record["method"], method);
        assert_eq!(record["url"], url);
        assert!(record.get("cases").is_none());
    }

    common::cleanup(app).await;
}

// ── Failures ────────────────────────────────────────────────────

#[tokio::test]
async fn corrupt_cases_document_is_server_error() {
    let app = common::spawn_app().await;

    sqlx::query("UPDATE endpoint SET cases = '{\"not\": \"a list\"}' WHERE operation_id = 'createPost'")
        .execute(app.pool())
        .await
        .unwrap();

    let (body, status) = app.get("/endpoints").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    common::cleanup(app).await;
}

#[tokio::test]
async fn closed_store_is_server_error() {
    let app = common::spawn_app().await;
    app.state.shutdown().await;

    let (body, status) = app.get("/endpoints").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}
