//! Analyze and analyze-and-remember flows.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};

use super::classifier::classify;
use super::validator::validate_invocation;
use crate::engine::AnalysisEngine;
use crate::error_handling::{AnalysisError, ReportError};
use crate::models::{AnalysisRequest, AnalyzedUrl, Report, ReportDraft};
use crate::storage::ReportRepository;

/// Result of analyze-and-remember.
///
/// The analysis stands on its own; `report` only says whether it was also
/// written to history.
#[derive(Debug)]
pub struct Remembered {
    pub analysis: AnalyzedUrl,
    pub report: Result<Report, ReportError>,
}

/// Runs one URL through invoke, validate and classify.
#[derive(Clone)]
pub struct Analyzer {
    engine: Arc<dyn AnalysisEngine>,
}

impl Analyzer {
    pub fn new(engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { engine }
    }

    /// Analyzes a URL.
    ///
    /// Blank input is rejected before the engine is started. Every other
    /// failure is terminal for this call. Nothing is persisted.
    pub async fn analyze(&self, url: &str) -> Result<AnalyzedUrl, AnalysisError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AnalysisError::ClientInput);
        }

        debug!("Starting analysis for {}", url);
        let start_time = Instant::now();
        let result = self.run(url).await;
        let elapsed = start_time.elapsed().as_secs_f64();

        match &result {
            Ok(analyzed) => info!(
                "Analyzed {} in {:.2}s: score {} ({}), {} findings",
                analyzed.url,
                elapsed,
                analyzed.score,
                analyzed.verdict,
                analyzed.finding_count()
            ),
            Err(e) => error!(
                "Analysis of {} failed after {:.2}s [{}]: {}",
                url,
                elapsed,
                e.kind(),
                e
            ),
        }
        result
    }

    async fn run(&self, url: &str) -> Result<AnalyzedUrl, AnalysisError> {
        let invocation = self.engine.invoke(&AnalysisRequest::new(url)).await?;
        if !invocation.termination.success {
            warn!(
                "Analysis engine exited unsuccessfully for {} (exit code {:?})",
                url, invocation.termination.exit_code
            );
        }

        let result = validate_invocation(&invocation, url)?;
        let (verdict, color) = classify(result.score);
        Ok(AnalyzedUrl::new(result, verdict, color))
    }

    /// Analyzes a URL, then records it in history.
    ///
    /// A persistence failure is logged and returned alongside the analysis;
    /// it never turns a successful analysis into an error.
    pub async fn analyze_and_remember(
        &self,
        url: &str,
        reports: &ReportRepository,
    ) -> Result<Remembered, AnalysisError> {
        let analysis = self.analyze(url).await?;
        let report = remember(reports, &analysis).await;
        Ok(Remembered { analysis, report })
    }
}

/// Writes a finished analysis to history as `(url, score, verdict)`.
pub async fn remember(
    reports: &ReportRepository,
    analysis: &AnalyzedUrl,
) -> Result<Report, ReportError> {
    match reports.create(ReportDraft::from(analysis)).await {
        Ok(report) => {
            info!("Remembered {} as report {}", report.url, report.id);
            Ok(report)
        }
        Err(e) => {
            warn!("Failed to remember analysis of {}: {e}", analysis.url);
            Err(e)
        }
    }
}
