//! Shared test helpers for storage-backed tests.

#[cfg(test)]
use sqlx::sqlite::SqlitePoolOptions;

#[cfg(test)]
use crate::storage::{run_migrations, ReportRepository};

/// Creates a repository over a migrated in-memory database.
///
/// A single connection is used so every query sees the same in-memory
/// database.
#[cfg(test)]
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
