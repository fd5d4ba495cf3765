//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults for paths, engine and server)
//! - CLI option types and parsing
//! - Validation of values clap cannot check

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Cli, Command, Config, ConfigValidationError, HistoryCommand, LogFormat, LogLevel, Opt,
};
