use sqlx::{SqliteConnection, SqlitePool};

use crate::db::{endpoint_records, endpoints};
use crate::error::AppError;
use crate::models::{EndpointRecord, NewEndpoint, SchemaVersion};

const META_DDL: &str = "CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

const FLAT_DDL: &str = "CREATE TABLE IF NOT EXISTS endpointdata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    method TEXT NOT NULL,
    url TEXT NOT NULL,
    description TEXT
)";

// `cases` holds the JSON array of embedded case documents.
const STRUCTURED_DDL: &str = "CREATE TABLE IF NOT EXISTS endpoint (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    operation_id TEXT NOT NULL,
    name TEXT NOT NULL,
    summary TEXT,
    description TEXT,
    method TEXT NOT NULL,
    path TEXT NOT NULL,
    base_url TEXT NOT NULL,
    cases TEXT NOT NULL
)";

const VERSION_KEY: &str = "schema_version";

/// What an opened store contains before bootstrap touches it.
#[derive(Debug, PartialEq)]
enum Detected {
    Fresh,
    Marked(i64),
    /// Entity table present but no version marker, as left by older builds.
    Unmarked(SchemaVersion),
}

/// Bring the store to `target`, creating or upgrading tables as needed.
///
/// Safe to call repeatedly. Fails with [`AppError::SchemaConflict`] when the store
/// is newer than `target`, carries an unknown version, or holds an entity table
/// whose columns do not match.
pub async fn ensure_schema(pool: &SqlitePool, target: SchemaVersion) -> Result<SchemaVersion, AppError> {
    let mut tx = pool.begin().await.map_err(AppError::StorageUnavailable)?;

    let detected = detect(&mut tx).await?;
    let current = match detected {
        Detected::Fresh => {
            tracing::info!(schema = %target, "Creating schema");
            create_table(&mut tx, target).await?;
            set_meta(&mut tx, VERSION_KEY, &target.as_i64().to_string()).await?;
            tx.commit().await?;
            return Ok(target);
        }
        Detected::Marked(raw) => SchemaVersion::from_i64(raw)
            .ok_or_else(|| AppError::SchemaConflict(format!("unsupported schema version {raw}")))?,
        Detected::Unmarked(version) => {
            tracing::info!(schema = %version, table = version.table(), "Found unversioned store");
            version
        }
    };

    if current > target {
        return Err(AppError::SchemaConflict(format!(
            "store is at schema {current}, which is newer than the requested {target}"
        )));
    }

    verify_or_create(&mut tx, current).await?;

    if current < target {
        upgrade_flat_to_structured(&mut tx).await?;
    }

    set_meta(&mut tx, VERSION_KEY, &target.as_i64().to_string()).await?;
    tx.commit().await?;

    tracing::debug!(schema = %target, "Schema ready");
    Ok(target)
}

/// Upsert one `schema_meta` entry, creating the table if needed.
pub(crate) async fn set_meta(conn: &mut SqliteConnection, key: &str, value: &str) -> Result<(), AppError> {
    sqlx::query(META_DDL).execute(&mut *conn).await?;
    sqlx::query(
        "INSERT INTO schema_meta (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn get_meta(pool: &SqlitePool, key: &str) -> Result<Option<String>, AppError> {
    let mut conn = pool.acquire().await.map_err(AppError::StorageUnavailable)?;
    if !table_exists(&mut conn, "schema_meta").await? {
        return Ok(None);
    }
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM schema_meta WHERE key = ?1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(value)
}

async fn detect(conn: &mut SqliteConnection) -> Result<Detected, AppError> {
    if table_exists(conn, "schema_meta").await? {
        let raw = sqlx::query_scalar::<_, String>("SELECT value FROM schema_meta WHERE key = ?1")
            .bind(VERSION_KEY)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(raw) = raw {
            let version = raw
                .parse::<i64>()
                .map_err(|_| AppError::SchemaConflict(format!("invalid schema version marker '{raw}'")))?;
            return Ok(Detected::Marked(version));
        }
    }

    if table_exists(conn, SchemaVersion::Structured.table()).await? {
        return Ok(Detected::Unmarked(SchemaVersion::Structured));
    }
    if table_exists(conn, SchemaVersion::Flat.table()).await? {
        return Ok(Detected::Unmarked(SchemaVersion::Flat));
    }
    Ok(Detected::Fresh)
}

async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, AppError> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )
    .bind(table)
    .fetch_one(&mut *conn)
    .await?;
    Ok(found > 0)
}

async fn create_table(conn: &mut SqliteConnection, version: SchemaVersion) -> Result<(), AppError> {
    let ddl = match version {
        SchemaVersion::Flat => FLAT_DDL,
        SchemaVersion::Structured => STRUCTURED_DDL,
    };
    sqlx::query(ddl).execute(&mut *conn).await?;
    Ok(())
}

async fn verify_or_create(conn: &mut SqliteConnection, version: SchemaVersion) -> Result<(), AppError> {
    let columns = sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1)")
        .bind(version.table())
        .fetch_all(&mut *conn)
        .await?;

    if columns.is_empty() {
        tracing::warn!(table = version.table(), "Entity table missing, recreating");
        return create_table(conn, version).await;
    }

    let missing: Vec<&str> = version
        .columns()
        .iter()
        .copied()
        .filter(|expected| !columns.iter().any(|c| c.as_str() == *expected))
        .collect();

    if !missing.is_empty() {
        return Err(AppError::SchemaConflict(format!(
            "table '{}' does not match schema {version}: missing columns {}",
            version.table(),
            missing.join(", ")
        )));
    }
    Ok(())
}

async fn upgrade_flat_to_structured(conn: &mut SqliteConnection) -> Result<(), AppError> {
    // Flat rows keep their ids, so the target table must match and be empty.
    if !table_exists(conn, SchemaVersion::Structured.table()).await? {
        create_table(conn, SchemaVersion::Structured).await?;
    }
    verify_or_create(conn, SchemaVersion::Structured).await?;
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM endpoint")
        .fetch_one(&mut *conn)
        .await?;
    if existing > 0 {
        return Err(AppError::SchemaConflict(format!(
            "cannot upgrade to schema {}: table 'endpoint' already holds {existing} rows",
            SchemaVersion::Structured
        )));
    }

    let records = endpoint_records::list_all(&mut *conn).await?;
    let count = records.len();
    for record in records {
        let (id, endpoint) = upgrade_record(record);
        endpoints::restore(&mut *conn, id, &endpoint).await?;
    }

    sqlx::query("DROP TABLE endpointdata").execute(&mut *conn).await?;

    tracing::info!(
        count,
        from = %SchemaVersion::Flat,
        to = %SchemaVersion::Structured,
        "Upgraded schema"
    );
    Ok(())
}

/// Carry a flat row into the structured layout, keeping its id.
fn upgrade_record(record: EndpointRecord) -> (i64, NewEndpoint) {
    let (base_url, path) = split_url(&record.url);
    let endpoint = NewEndpoint {
        operation_id: operation_id_from_name(&record.name),
        name: record.name,
        summary: None,
        description: record.description,
        method: record.method,
        path,
        base_url,
        cases: Vec::new(),
    };
    (record.id, endpoint)
}

/// Split an absolute URL into scheme+authority and the remaining path.
fn split_url(url: &str) -> (String, String) {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[authority_start..].find(['/', '?', '#']) {
        Some(offset) => {
            let (base, rest) = url.split_at(authority_start + offset);
            let path = if rest.starts_with('/') {
                rest.to_string()
            } else {
                format!("/{rest}")
            };
            (base.to_string(), path)
        }
        None => (url.to_string(), "/".to_string()),
    }
}

/// "Get Users" -> "getUsers"
fn operation_id_from_name(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for (i, word) in name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let lower = word.to_lowercase();
        if i == 0 {
            id.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            id.extend(first.to_uppercase());
            id.push_str(chars.as_str());
        }
    }
    id
}
