//! HTTP API server.
//!
//! Provides:
//! - `POST /api/analyze` - run one URL through the analysis pipeline
//! - `GET|POST /api/reports` - list or create history reports
//! - `GET|DELETE /api/reports/:id` - fetch or delete one report

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use handlers::{analyze_handler, create_report, delete_report, get_report, list_reports};
pub use types::{AnalysisErrorBody, ApiError, AppState, MessageBody};

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/api/reports", get(list_reports).post(create_report))
        .route("/api/reports/:id", get(get_report).delete(delete_report))
        .with_state(state)
}

/// Binds `bind:port` and serves until `shutdown` is cancelled.
pub async fn start_server(
    bind: &str,
    port: u16,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(format!("{}:{}", bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}:{}: {}", bind, port, e))?;

    log::info!("API server listening on http://{}:{}/", bind, port);
    serve(listener, state, shutdown).await
}

/// Serves on an already bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;
    Ok(())
}
