use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// The store exists but its structure or version does not match what this build expects.
    SchemaConflict(String),
    /// The store could not be opened, or no connection could be acquired.
    StorageUnavailable(sqlx::Error),
    /// A persisted document does not match the entity field contract.
    SerializationMismatch(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::SchemaConflict(msg) => write!(f, "Schema Conflict: {msg}"),
            AppError::StorageUnavailable(err) => write!(f, "Storage Unavailable: {err}"),
            AppError::SerializationMismatch(msg) => write!(f, "Serialization Mismatch: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::StorageUnavailable(err) | AppError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every variant is a server-side failure; details stay in the log.
        tracing::error!("{self}");
        let body = json!({ "error": "Internal server error" });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => AppError::StorageUnavailable(err),
            _ => AppError::Database(err),
        }
    }
}
