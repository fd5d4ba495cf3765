//! Server state and response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::analysis::Analyzer;
use crate::error_handling::{AnalysisError, ReportError};
use crate::storage::ReportRepository;

/// Shared state for the API server
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub reports: ReportRepository,
}

/// Error body of the analyze endpoint
#[derive(Debug, Serialize)]
pub struct AnalysisErrorBody {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Body used by the report endpoints
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// Errors a handler can return
#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    Report(ReportError),
    BadRequest(String),
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e)
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        ApiError::Report(e)
    }
}

fn analysis_status(e: &AnalysisError) -> StatusCode {
    if e.is_client_error() {
        return StatusCode::BAD_REQUEST;
    }
    match e {
        AnalysisError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to API clients. Launch and I/O failures carry host paths
/// and OS errors, which stay in the server log.
fn public_message(e: &AnalysisError) -> String {
    match e {
        AnalysisError::EngineLaunch { .. } | AnalysisError::Io(_) => {
            log::error!("Analysis engine unavailable: {e}");
            "Analysis engine unavailable".to_string()
        }
        _ => e.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Analysis(e) => {
                let body = AnalysisErrorBody {
                    error: public_message(&e),
                    kind: e.kind().as_str(),
                    detail: e.detail().map(str::to_string),
                };
                (analysis_status(&e), Json(body)).into_response()
            }
            ApiError::Report(ReportError::Validation { field }) => {
                let body = MessageBody {
                    message: "Missing required fields".to_string(),
                    field: Some(field),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Report(ReportError::NotFound) => (
                StatusCode::NOT_FOUND,
                Json(MessageBody::new("Report not found")),
            )
                .into_response(),
            ApiError::Report(ReportError::Database(e)) => {
                log::error!("Report store failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody::new("Internal server error")),
                )
                    .into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(MessageBody::new(message))).into_response()
            }
        }
    }
}
