pub mod catalog;
pub mod endpoint_records;
pub mod endpoints;
pub mod schema;
pub mod seed;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::AppError;

/// Open the SQLite store, creating the file and its directory on first use.
///
/// WAL mode lets concurrent requests read while bootstrap or another process writes.
pub async fn connect(config: &Config) -> Result<SqlitePool, AppError> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::StorageUnavailable(sqlx::Error::Io(e)))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(AppError::StorageUnavailable)
}
