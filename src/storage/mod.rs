// storage/mod.rs
// History store: SQLite pool, migrations and the report repository

pub mod migrations;
pub mod pool;
pub mod reports;
pub mod test_helpers;

// Re-export commonly used items
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
pub use reports::ReportRepository;
