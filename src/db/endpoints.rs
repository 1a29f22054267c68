use sqlx::SqliteExecutor;

use crate::error::AppError;
use crate::models::{Case, Endpoint, NewEndpoint};

#[derive(sqlx::FromRow)]
struct EndpointRow {
    id: i64,
    operation_id: String,
    name: String,
    summary: Option<String>,
    description: Option<String>,
    method: String,
    path: String,
    base_url: String,
    cases: String,
}

impl TryFrom<EndpointRow> for Endpoint {
    type Error = AppError;

    fn try_from(row: EndpointRow) -> Result<Self, Self::Error> {
        let cases: Vec<Case> = serde_json::from_str(&row.cases).map_err(|e| {
            AppError::SerializationMismatch(format!("endpoint {}: invalid cases document: {e}", row.id))
        })?;
        Ok(Endpoint {
            id: row.id,
            operation_id: row.operation_id,
            name: row.name,
            summary: row.summary,
            description: row.description,
            method: row.method,
            path: row.path,
            base_url: row.base_url,
            cases,
        })
    }
}

/// All endpoints in insertion order.
pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Endpoint>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, EndpointRow>(
        "SELECT id, operation_id, name, summary, description, method, path, base_url, cases
         FROM endpoint ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(Endpoint::try_from).collect()
}

pub async fn create<'e, E>(executor: E, endpoint: &NewEndpoint) -> Result<Endpoint, AppError>
where
    E: SqliteExecutor<'e>,
{
    insert(executor, None, endpoint).await
}

/// Insert under a known id. Used when carrying rows over from an older schema.
pub async fn restore<'e, E>(executor: E, id: i64, endpoint: &NewEndpoint) -> Result<Endpoint, AppError>
where
    E: SqliteExecutor<'e>,
{
    insert(executor, Some(id), endpoint).await
}

async fn insert<'e, E>(executor: E, id: Option<i64>, endpoint: &NewEndpoint) -> Result<Endpoint, AppError>
where
    E: SqliteExecutor<'e>,
{
    let cases = serde_json::to_string(&endpoint.cases)
        .map_err(|e| AppError::SerializationMismatch(format!("cannot encode cases: {e}")))?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO endpoint (id, operation_id, name, summary, description, method, path, base_url, cases)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id",
    )
    .bind(id)
    .bind(&endpoint.operation_id)
    .bind(&endpoint.name)
    .bind(endpoint.summary.as_deref())
    .bind(endpoint.description.as_deref())
    .bind(&endpoint.method)
    .bind(&endpoint.path)
    .bind(&endpoint.base_url)
    .bind(cases)
    .fetch_one(executor)
    .await?;

    Ok(endpoint.clone().with_id(id))
}
