//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - Analysis engine
//! - Report repository

mod logger;

use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::engine::ProcessEngine;
use crate::error_handling::{DatabaseError, InitializationError};
use crate::storage::ReportRepository;

// Re-export public API
pub use logger::init_logger_with;

/// Validates the configuration, mapping failures to an initialization error.
pub fn check_config(config: &Config) -> Result<(), InitializationError> {
    config
        .validate()
        .map_err(|e| InitializationError::ConfigError(e.to_string()))
}

/// Builds the analyzer backed by a subprocess engine.
pub fn init_analyzer(config: &Config) -> Analyzer {
    let engine = ProcessEngine::new(config.engine_command());
    let command = engine.command();
    log::info!(
        "Analysis engine: {} {} (timeout {}s)",
        command.program,
        command.args.join(" "),
        command.timeout.as_secs()
    );
    Analyzer::new(Arc::new(engine))
}

/// Opens the report store at the configured path.
pub async fn init_repository(config: &Config) -> Result<ReportRepository, DatabaseError> {
    ReportRepository::open(&config.db_path).await
}
