//! Error type definitions.
//!
//! This module defines the error types used throughout the application: the
//! analysis failure taxonomy, report persistence failures, and startup errors.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Invalid configuration detected before startup.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Failures on the analysis path.
///
/// Every variant is terminal for the request that produced it: nothing is
/// retried and no partial result is returned.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The request carried no usable URL. The engine is never started.
    #[error("URL is required")]
    ClientInput,

    /// The engine process could not be started.
    #[error("Analysis engine could not be started ({program}): {source}")]
    EngineLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine wrote to its diagnostic channel.
    #[error("Analysis engine error")]
    Engine { diagnostics: String },

    /// The engine produced nothing on its output channel.
    #[error("Analysis engine returned empty output")]
    EmptyOutput { output: String },

    /// The engine produced output that is not a valid analysis result.
    #[error("Failed to parse analysis engine output: {reason}")]
    MalformedOutput { reason: String, output: String },

    /// The engine produced a well-formed message reporting its own failure.
    #[error("Analysis engine reported a failure: {message}")]
    EngineReported { message: String },

    /// The engine did not terminate within the configured bound.
    #[error("Analysis engine timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// I/O failure while talking to a running engine.
    #[error("Analysis engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable categories of [`AnalysisError`], used for logs and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum AnalysisErrorKind {
    ClientInput,
    EngineLaunch,
    Engine,
    EmptyOutput,
    MalformedOutput,
    EngineReported,
    Timeout,
    Io,
}

impl AnalysisErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisErrorKind::ClientInput => "client_input",
            AnalysisErrorKind::EngineLaunch => "engine_launch",
            AnalysisErrorKind::Engine => "engine_error",
            AnalysisErrorKind::EmptyOutput => "empty_output",
            AnalysisErrorKind::MalformedOutput => "malformed_output",
            AnalysisErrorKind::EngineReported => "engine_reported",
            AnalysisErrorKind::Timeout => "timeout",
            AnalysisErrorKind::Io => "engine_io",
        }
    }
}

impl std::fmt::Display for AnalysisErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AnalysisError {
    pub fn kind(&self) -> AnalysisErrorKind {
        match self {
            AnalysisError::ClientInput => AnalysisErrorKind::ClientInput,
            AnalysisError::EngineLaunch { .. } => AnalysisErrorKind::EngineLaunch,
            AnalysisError::Engine { .. } => AnalysisErrorKind::Engine,
            AnalysisError::EmptyOutput { .. } => AnalysisErrorKind::EmptyOutput,
            AnalysisError::MalformedOutput { .. } => AnalysisErrorKind::MalformedOutput,
            AnalysisError::EngineReported { .. } => AnalysisErrorKind::EngineReported,
            AnalysisError::Timeout { .. } => AnalysisErrorKind::Timeout,
            AnalysisError::Io(_) => AnalysisErrorKind::Io,
        }
    }

    /// Operator-facing payload: diagnostic text or raw engine output.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AnalysisError::Engine { diagnostics } => Some(diagnostics),
            AnalysisError::EmptyOutput { output } => Some(output),
            AnalysisError::MalformedOutput { output, .. } => Some(output),
            AnalysisError::EngineReported { message } => Some(message),
            _ => None,
        }
    }

    /// True when the caller, not the engine, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::ClientInput)
    }
}

/// Failures of the report repository.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required field was missing or empty on creation.
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// No report has the requested identifier.
    #[error("Report not found")]
    NotFound,

    /// Underlying store failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for ReportError {
    fn from(e: sqlx::Error) -> Self {
        ReportError::Database(DatabaseError::SqlError(e))
    }
}
