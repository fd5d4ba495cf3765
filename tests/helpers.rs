// Shared test helpers: in-memory report store, scripted engines and a
// running API server.

#![allow(dead_code)] // Each test file uses a subset

use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use tokio_util::sync::CancellationToken;

use phishlink::server::{serve, AppState};
use phishlink::{run_migrations, Analyzer, EngineCommand, ProcessEngine, ReportRepository};

/// Creates a report repository over a migrated in-memory database.
pub async fn create_test_repository() -> ReportRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    ReportRepository::new(pool)
}

/// An engine that runs `script` with `sh -c`.
pub fn sh_engine(script: &str) -> ProcessEngine {
    ProcessEngine::new(
        EngineCommand::new("sh", vec!["-c".to_string(), script.to_string()])
            .with_timeout(Duration::from_secs(10)),
    )
}

/// A shell engine that echoes the requested URL back with a fixed score.
pub fn echo_engine(score: i64) -> ProcessEngine {
    sh_engine(&format!(
        r#"read -r line; url=$(printf '%s' "$line" | sed 's/.*"url":"\([^"]*\)".*/\1/'); printf '{{"url":"%s","score":{},"url_reasons":[],"network_reasons":[],"fake_login_reasons":[],"environment_warnings":[]}}' "$url""#,
        score
    ))
}

/// A running API server bound to an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub reports: ReportRepository,
    shutdown: CancellationToken,
}

impl TestServer {
    pub async fn start(engine: ProcessEngine) -> Self {
        let reports = create_test_repository().await;
        let state = AppState {
            analyzer: Analyzer::new(Arc::new(engine)),
            reports: reports.clone(),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let shutdown = CancellationToken::new();
        tokio::spawn(serve(listener, state, shutdown.clone()));
        Self {
            base_url: format!("http://{}", addr),
            reports,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
