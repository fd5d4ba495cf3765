//! Report collection handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::super::types::{ApiError, AppState, MessageBody};
use crate::error_handling::ReportError;
use crate::models::{Report, ReportDraft};

/// Unknown or unparsable ids are both "not found".
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::Report(ReportError::NotFound))
}

/// `GET /api/reports`
pub async fn list_reports(State(state): State<AppState>) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(state.reports.list_all().await?))
}

/// `POST /api/reports`
pub async fn create_report(
    State(state): State<AppState>,
    body: Result<Json<ReportDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let Json(draft) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let report = state.reports.create(draft).await?;
    log::info!("Created report {} for {}", report.id, report.url);
    Ok((StatusCode::CREATED, Json(report)))
}

/// `GET /api/reports/:id`
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.reports.get_by_id(id).await?))
}

/// `DELETE /api/reports/:id`
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = parse_id(&id)?;
    state.reports.delete_by_id(id).await?;
    log::info!("Deleted report {}", id);
    Ok(Json(MessageBody::new("Report deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert!(matches!(parse_id("12"), Ok(12)));
        assert!(matches!(
            parse_id("64b7f0c2e1"),
            Err(ApiError::Report(ReportError::NotFound))
        ));
    }
}
