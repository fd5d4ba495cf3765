// storage/migrations.rs
// Database migration management

use sqlx::migrate::Migrator;
use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// Migrations from `migrations/`, embedded at compile time so a deployed
/// binary does not need the source tree.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies all pending migrations.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
