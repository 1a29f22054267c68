pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::models::SchemaVersion;
use crate::state::{AppState, SharedState};

/// Open the store, bring its schema to the configured version and seed it.
///
/// Must finish before the listener accepts traffic.
pub async fn bootstrap(config: &Config) -> Result<SqlitePool, AppError> {
    tracing::info!(path = %config.database_path.display(), "Opening database");
    let pool = db::connect(config).await?;

    let schema = db::schema::ensure_schema(&pool, config.schema).await?;

    if config.seed {
        db::seed::seed_if_empty(&pool, schema).await?;
    } else {
        tracing::info!("Seeding disabled");
    }

    Ok(pool)
}

pub fn build_app(pool: SqlitePool, schema: SchemaVersion) -> (Router, SharedState) {
    let state: SharedState = Arc::new(AppState { pool, schema });

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
