//! Report repository.
//!
//! Owns the stored form of history records. Each operation touches a single
//! row, so no cross-record locking is needed.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::migrations::run_migrations;
use super::pool::init_db_pool_with_path;
use crate::error_handling::{DatabaseError, ReportError};
use crate::models::{Report, ReportDraft};

const SELECT_REPORT: &str =
    "SELECT id, url, score, verdict, created_at_ms, updated_at_ms FROM reports";

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NewReport {
    url: String,
    score: i64,
    verdict: String,
}

impl NewReport {
    /// Rejects missing or blank fields. The URL is stored trimmed.
    fn validate(draft: ReportDraft) -> Result<Self, ReportError> {
        let url = draft
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ReportError::Validation { field: "url" })?;
        let score = draft
            .score
            .as_ref()
            .and_then(score_from_json)
            .ok_or(ReportError::Validation { field: "score" })?;
        let verdict = draft
            .verdict
            .filter(|v| !v.trim().is_empty())
            .ok_or(ReportError::Validation { field: "verdict" })?;
        Ok(Self {
            url,
            score,
            verdict,
        })
    }
}

/// Accepts an integer or an integer written as text.
fn score_from_json(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

fn row_to_report(row: &SqliteRow) -> Result<Report, sqlx::Error> {
    Ok(Report {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        score: row.try_get("score")?,
        verdict: row.try_get("verdict")?,
        created_at: millis_to_datetime(row.try_get("created_at_ms")?),
        updated_at: millis_to_datetime(row.try_get("updated_at_ms")?),
    })
}

/// Handle to the history store. Cheap to clone; all clones share one pool.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Wraps an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database file and applies migrations.
    pub async fn open(db_path: &Path) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(db_path).await?;
        run_migrations(&pool).await?;
        info!("Report store ready at {}", db_path.display());
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool. Later operations fail with a database error.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Every stored report, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Report>, ReportError> {
        let rows = sqlx::query(&format!("{SELECT_REPORT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row_to_report(row).map_err(ReportError::from))
            .collect()
    }

    /// Validates and stores a new report.
    pub async fn create(&self, draft: ReportDraft) -> Result<Report, ReportError> {
        let new = NewReport::validate(draft)?;
        let now = Utc::now().timestamp_millis();

        let id: i64 = sqlx::query(
            "INSERT INTO reports (url, score, verdict, created_at_ms, updated_at_ms)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&new.url)
        .bind(new.score)
        .bind(&new.verdict)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?
        .try_get(0)?;

        debug!("Inserted report {} for {}", id, new.url);
        Ok(Report {
            id,
            url: new.url,
            score: new.score,
            verdict: new.verdict,
            created_at: millis_to_datetime(now),
            updated_at: millis_to_datetime(now),
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Report, ReportError> {
        let row = sqlx::query(&format!("{SELECT_REPORT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ReportError::NotFound)?;
        Ok(row_to_report(&row)?)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), ReportError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ReportError::NotFound);
        }
        debug!("Deleted report {}", id);
        Ok(())
    }
}
