//! phishlink library: phishing-risk assessment of URLs
//!
//! A URL is handed to an external heuristic engine, the engine's answer is
//! validated and classified into a verdict and a display color, and callers
//! may keep the outcome as a history report in SQLite.
//!
//! # Example
//!
//! ```no_run
//! use phishlink::{run_analyze, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     engine_args: vec!["./engine/scanner.py".to_string()],
//!     ..Default::default()
//! };
//!
//! let outcome = run_analyze(config, "https://example.com", false).await?;
//! println!("{} -> {}", outcome.analysis.url, outcome.analysis.verdict);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod analysis;
mod app;
pub mod config;
pub mod engine;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod server;
pub mod storage;

// Re-export public API
pub use analysis::{classify, Analyzer, RiskColor, Verdict};
pub use config::{Cli, Command, Config, HistoryCommand, LogFormat, LogLevel};
pub use engine::{AnalysisEngine, EngineCommand, EngineInvocation, ProcessEngine, Termination};
pub use error_handling::{AnalysisError, ReportError};
pub use models::{AnalysisRequest, AnalysisResult, AnalyzedUrl, Report, ReportDraft};
pub use run::{run_analyze, run_history, run_server, AnalyzeOutcome, HistoryOutput};
pub use storage::{run_migrations, ReportRepository};

// Entry points used by the binary
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::{cancel_on_ctrl_c, shutdown_gracefully};
    use crate::config::{Config, HistoryCommand};
    use crate::initialization::{check_config, init_analyzer, init_repository};
    use crate::models::{AnalyzedUrl, Report};
    use crate::server::{start_server, AppState};

    /// Result of a one-shot analysis.
    #[derive(Debug)]
    pub struct AnalyzeOutcome {
        pub analysis: AnalyzedUrl,
        /// Set when the analysis was also written to history.
        pub report: Option<Report>,
    }

    /// Result of a history command.
    #[derive(Debug)]
    pub enum HistoryOutput {
        Reports(Vec<Report>),
        Report(Report),
        Deleted(i64),
    }

    /// Serves the HTTP API until Ctrl-C.
    pub async fn run_server(config: Config) -> Result<()> {
        check_config(&config)?;
        let reports = init_repository(&config)
            .await
            .context("Failed to open report store")?;
        let analyzer = init_analyzer(&config);

        let cancel = CancellationToken::new();
        let signal_task = cancel_on_ctrl_c(cancel.clone());

        let state = AppState {
            analyzer,
            reports: reports.clone(),
        };
        let served = start_server(&config.bind, config.port, state, cancel.clone()).await;

        shutdown_gracefully(cancel, signal_task, reports).await;
        served
    }

    /// Analyzes one URL. With `remember`, also stores it in history; a
    /// storage failure is logged and leaves `report` empty.
    pub async fn run_analyze(config: Config, url: &str, remember: bool) -> Result<AnalyzeOutcome> {
        check_config(&config)?;
        let analyzer = init_analyzer(&config);

        if !remember {
            let analysis = analyzer.analyze(url).await?;
            return Ok(AnalyzeOutcome {
                analysis,
                report: None,
            });
        }

        let reports = init_repository(&config)
            .await
            .context("Failed to open report store")?;
        let remembered = analyzer.analyze_and_remember(url, &reports).await;
        reports.close().await;

        let remembered = remembered?;
        let report = match remembered.report {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Analysis kept but not stored: {e}");
                None
            }
        };
        Ok(AnalyzeOutcome {
            analysis: remembered.analysis,
            report,
        })
    }

    /// Runs one history command against the configured store.
    pub async fn run_history(config: Config, action: HistoryCommand) -> Result<HistoryOutput> {
        let reports = init_repository(&config)
            .await
            .context("Failed to open report store")?;
        let output = match action {
            HistoryCommand::List => reports.list_all().await.map(HistoryOutput::Reports),
            HistoryCommand::Show { id } => reports.get_by_id(id).await.map(HistoryOutput::Report),
            HistoryCommand::Delete { id } => {
                reports.delete_by_id(id).await.map(|()| HistoryOutput::Deleted(id))
            }
        };
        reports.close().await;
        if let Ok(HistoryOutput::Deleted(id)) = output {
            info!("Deleted report {}", id);
        }
        Ok(output?)
    }
}
