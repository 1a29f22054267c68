use serde_json::json;
use sqlx::SqlitePool;

use crate::db::schema::set_meta;
use crate::db::{endpoint_records, endpoints};
use crate::error::AppError;
use crate::models::{Case, NewEndpoint, NewEndpointRecord, Request, Response, Row, SchemaVersion};

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Insert the example endpoints when the entity table holds no rows.
///
/// Returns how many rows were written; 0 means the store already had data.
/// Runs in one transaction, so a failed seed leaves the table empty.
pub async fn seed_if_empty(pool: &SqlitePool, version: SchemaVersion) -> Result<u64, AppError> {
    let mut tx = pool.begin().await.map_err(AppError::StorageUnavailable)?;

    let existing = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", version.table()))
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0u64;
    match version {
        SchemaVersion::Flat => {
            for record in flat_fixtures() {
                endpoint_records::create(&mut *tx, &record).await?;
                inserted += 1;
            }
        }
        SchemaVersion::Structured => {
            for endpoint in structured_fixtures() {
                endpoints::create(&mut *tx, &endpoint).await?;
                inserted += 1;
            }
        }
    }

    set_meta(&mut tx, "seeded_at", &chrono::Utc::now().to_rfc3339()).await?;
    tx.commit().await?;

    tracing::info!(count = inserted, schema = %version, "Seeded example endpoints");
    Ok(inserted)
}

pub fn flat_fixtures() -> Vec<NewEndpointRecord> {
    vec![
        NewEndpointRecord {
            name: "Get Users".to_string(),
            method: "GET".to_string(),
            url: format!("{BASE_URL}/users"),
            description: Some("Fetch all users".to_string()),
        },
        NewEndpointRecord {
            name: "Create Post".to_string(),
            method: "POST".to_string(),
            url: format!("{BASE_URL}/posts"),
            description: Some("Create a new blog post".to_string()),
        },
        NewEndpointRecord {
            name: "Get Posts".to_string(),
            method: "GET".to_string(),
            url: format!("{BASE_URL}/posts"),
            description: Some("Fetch all blog posts".to_string()),
        },
    ]
}

pub fn structured_fixtures() -> Vec<NewEndpoint> {
    vec![
        NewEndpoint {
            operation_id: "getAllUsers".to_string(),
            name: "Get Users".to_string(),
            summary: Some("Retrieve all users".to_string()),
            description: Some(
                "Fetch all users from JSONPlaceholder API with their basic information".to_string(),
            ),
            method: "GET".to_string(),
            path: "/users".to_string(),
            base_url: BASE_URL.to_string(),
            cases: vec![Case {
                name: "Basic retrieval".to_string(),
                description: Some("Retrieve all users with default settings".to_string()),
                request: Request {
                    headers: vec![Row::new(1, "Accept", "application/json")],
                    query_params: vec![Row::new(1, "limit", "10")],
                    path_params: Vec::new(),
                    body: None,
                },
                response: json_response(
                    200,
                    r#"[{"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "username": "Bret"}]"#,
                ),
            }],
        },
        NewEndpoint {
            operation_id: "createPost".to_string(),
            name: "Create Post".to_string(),
            summary: Some("Create a new post".to_string()),
            description: Some("Create a new post in the JSONPlaceholder API".to_string()),
            method: "POST".to_string(),
            path: "/posts".to_string(),
            base_url: BASE_URL.to_string(),
            cases: vec![Case {
                name: "Basic creation".to_string(),
                description: Some("Create a post with title and body".to_string()),
                request: Request {
                    headers: vec![
                        Row::new(1, "Content-Type", "application/json"),
                        Row::new(2, "Accept", "application/json"),
                    ],
                    query_params: Vec::new(),
                    path_params: Vec::new(),
                    body: Some(json!({ "title": "foo", "body": "bar", "userId": 1 })),
                },
                response: json_response(
                    201,
                    r#"{"id": 101, "title": "foo", "body": "bar", "userId": 1}"#,
                ),
            }],
        },
        NewEndpoint {
            operation_id: "getAllPosts".to_string(),
            name: "Get Posts".to_string(),
            summary: Some("Retrieve all posts".to_string()),
            description: Some(
                "Fetch all posts from JSONPlaceholder API with optional filtering".to_string(),
            ),
            method: "GET".to_string(),
            path: "/posts".to_string(),
            base_url: BASE_URL.to_string(),
            cases: vec![Case {
                name: "Filtered retrieval".to_string(),
                description: Some("Retrieve posts filtered by userId".to_string()),
                request: Request {
                    headers: vec![Row::new(1, "Accept", "application/json")],
                    query_params: vec![Row::new(1, "userId", "1"), Row::new(2, "limit", "10")],
                    path_params: Vec::new(),
                    body: None,
                },
                response: json_response(
                    200,
                    r#"[{"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"}]"#,
                ),
            }],
        },
    ]
}

fn json_response(status_code: u16, data: &str) -> Response {
    Response {
        status_code,
        headers: vec![Row::new(1, "Content-Type", "application/json")],
        body: Some(json!({ "data": data })),
    }
}
