//! Analyze handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::super::types::{ApiError, AppState};
use crate::error_handling::AnalysisError;
use crate::models::{AnalysisRequest, AnalyzedUrl};

/// `POST /api/analyze` with `{ "url": ... }`.
///
/// A body that is missing, not JSON, or has no usable URL is a client input
/// error. The result is not stored; callers post to `/api/reports` for that.
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzedUrl>, ApiError> {
    let Json(request) = body.map_err(|e| {
        log::debug!("Rejected analyze body: {e}");
        ApiError::Analysis(AnalysisError::ClientInput)
    })?;
    let analyzed = state.analyzer.analyze(&request.url).await?;
    Ok(Json(analyzed))
}
