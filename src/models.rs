//! Data types exchanged between the engine, the pipeline, the store and HTTP
//! callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{RiskColor, Verdict};

/// A single analyze request. Also the message written to the engine's stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub url: String,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// A validated engine result.
///
/// `score` is always present and non-negative; reason lists may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    pub score: i64,
    pub url_reasons: Vec<String>,
    pub network_reasons: Vec<String>,
    pub fake_login_reasons: Vec<String>,
    pub environment_warnings: Vec<String>,
}

/// An [`AnalysisResult`] with its verdict and display color attached.
///
/// This is what the analyze endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedUrl {
    pub url: String,
    pub score: i64,
    pub verdict: Verdict,
    pub color: RiskColor,
    pub color_hex: &'static str,
    pub url_reasons: Vec<String>,
    pub network_reasons: Vec<String>,
    pub fake_login_reasons: Vec<String>,
    pub environment_warnings: Vec<String>,
}

impl AnalyzedUrl {
    pub fn new(result: AnalysisResult, verdict: Verdict, color: RiskColor) -> Self {
        Self {
            url: result.url,
            score: result.score,
            verdict,
            color,
            color_hex: color.hex(),
            url_reasons: result.url_reasons,
            network_reasons: result.network_reasons,
            fake_login_reasons: result.fake_login_reasons,
            environment_warnings: result.environment_warnings,
        }
    }

    /// Total number of findings across all categories.
    pub fn finding_count(&self) -> usize {
        self.url_reasons.len()
            + self.network_reasons.len()
            + self.fake_login_reasons.len()
            + self.environment_warnings.len()
    }
}

/// Unvalidated input for report creation.
///
/// The score is kept as raw JSON because callers post it either as a number
/// or as the text shown on the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportDraft {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<serde_json::Value>,
    #[serde(default)]
    pub verdict: Option<String>,
}

impl ReportDraft {
    pub fn new(url: impl Into<String>, score: i64, verdict: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            score: Some(serde_json::Value::from(score)),
            verdict: Some(verdict.into()),
        }
    }
}

impl From<&AnalyzedUrl> for ReportDraft {
    fn from(analyzed: &AnalyzedUrl) -> Self {
        ReportDraft::new(
            analyzed.url.clone(),
            analyzed.score,
            analyzed.verdict.as_str(),
        )
    }
}

/// A persisted history record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub url: String,
    pub score: i64,
    pub verdict: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
