#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;

use minerva::config::Config;
use minerva::models::SchemaVersion;
use minerva::state::SharedState;

/// A running test server backed by its own temporary SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub state: SharedState,
    pub client: Client,
    // Keeps the database directory alive for the lifetime of the test.
    pub dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.pool
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Config pointing at a fresh database inside `dir`.
pub fn test_config(dir: &TempDir, schema: SchemaVersion) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        database_path: dir.path().join("data").join("minerva.db"),
        schema,
        seed: true,
        dev_mode: false,
        log_level: "warn".to_string(),
    }
}

/// Open a bootstrapped pool without starting a server.
pub async fn open_store(config: &Config) -> SqlitePool {
    minerva::bootstrap(config).await.expect("bootstrap failed")
}

/// Spawn the structured-schema app with seeding enabled.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = test_config(&dir, SchemaVersion::Structured);
    configure(&mut config);

    let pool = open_store(&config).await;
    let (app, state) = minerva::build_app(pool, config.schema);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        state,
        client: Client::new(),
        dir,
    }
}

pub async fn cleanup(app: TestApp) {
    app.state.shutdown().await;
}
