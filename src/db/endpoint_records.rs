use sqlx::SqliteExecutor;

use crate::error::AppError;
use crate::models::{EndpointRecord, NewEndpointRecord};

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<EndpointRecord>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let records = sqlx::query_as::<_, EndpointRecord>(
        "SELECT id, name, method, url, description FROM endpointdata ORDER BY id",
    )
    .fetch_all(executor)
    .await?;
    Ok(records)
}

pub async fn create<'e, E>(executor: E, record: &NewEndpointRecord) -> Result<EndpointRecord, AppError>
where
    E: SqliteExecutor<'e>,
{
    let record = sqlx::query_as::<_, EndpointRecord>(
        "INSERT INTO endpointdata (name, method, url, description)
         VALUES (?1, ?2, ?3, ?4) RETURNING id, name, method, url, description",
    )
    .bind(&record.name)
    .bind(&record.method)
    .bind(&record.url)
    .bind(record.description.as_deref())
    .fetch_one(executor)
    .await?;
    Ok(record)
}
