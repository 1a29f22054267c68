use sqlx::SqlitePool;

use crate::db::{endpoint_records, endpoints};
use crate::error::AppError;
use crate::models::{EndpointList, SchemaVersion};

/// Read every endpoint of the active schema version.
///
/// Holds one pooled connection for the single read; it goes back to the pool
/// when this function returns, on success or error.
pub async fn list_all(pool: &SqlitePool, version: SchemaVersion) -> Result<EndpointList, AppError> {
    let mut conn = pool.acquire().await.map_err(AppError::StorageUnavailable)?;

    let list = match version {
        SchemaVersion::Flat => EndpointList::Flat(endpoint_records::list_all(&mut *conn).await?),
        SchemaVersion::Structured => EndpointList::Structured(endpoints::list_all(&mut *conn).await?),
    };

    tracing::debug!(count = list.len(), schema = %version, "Listed endpoints");
    Ok(list)
}
