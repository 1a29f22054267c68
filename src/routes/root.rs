use axum::Json;
use serde_json::json;

pub async fn welcome() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to Minerva BE" }))
}
