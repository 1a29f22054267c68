use std::sync::Arc;

use sqlx::SqlitePool;

use crate::models::SchemaVersion;

pub type SharedState = Arc<AppState>;

/// Process-wide state, built once after bootstrap and shared by every handler.
pub struct AppState {
    pub pool: SqlitePool,
    pub schema: SchemaVersion,
}

impl AppState {
    /// Close the connection pool, waiting for borrowed connections to come back.
    pub async fn shutdown(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
