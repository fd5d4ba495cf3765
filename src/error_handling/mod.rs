//! Error handling.
//!
//! Errors are split by where they surface:
//! - **Analysis**: failures of a single analyze request (client input, engine
//!   launch, diagnostics, empty or malformed output, timeout)
//! - **Reports**: validation and lookup failures of the history store
//! - **Startup**: logger, configuration and database initialization

mod types;

// Re-export public API
pub use types::{
    AnalysisError, AnalysisErrorKind, DatabaseError, InitializationError, ReportError,
};
