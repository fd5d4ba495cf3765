//! Graceful shutdown handling.

use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::storage::ReportRepository;

/// Cancels `cancel` on Ctrl-C. The task also ends if `cancel` is cancelled
/// by someone else first. If the signal handler cannot be installed the
/// server keeps running and the task waits for an external cancel.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    info!("Shutdown requested, draining in-flight requests");
                    cancel.cancel();
                }
                Err(e) => {
                    warn!("Failed to listen for Ctrl-C, continuing without it: {e}");
                    cancel.cancelled().await;
                }
            },
            _ = cancel.cancelled() => {}
        }
    })
}

/// Stops the signal listener and closes the report store.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    signal_task: JoinHandle<()>,
    reports: ReportRepository,
) {
    cancel.cancel();
    let _ = signal_task.await;
    reports.close().await;
    info!("Report store closed");
}
