//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_BIND, DEFAULT_ENGINE_PROGRAM, DEFAULT_ENGINE_SCRIPT,
    DEFAULT_ENGINE_TIMEOUT_SECS, DEFAULT_PORT,
};
use crate::engine::EngineCommand;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Serve the API on the default port
/// phishlink serve
///
/// # One-shot analysis, stored in history
/// phishlink analyze https://example.com --remember
///
/// # Use a different engine script
/// phishlink --engine-arg ./engine/scanner.py serve --port 8080
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "phishlink",
    about = "Assesses URLs for phishing risk and keeps a history of reports."
)]
pub struct Cli {
    #[command(flatten)]
    pub options: Opt,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, global = true, env = "PHISHLINK_DB_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Program that runs the analysis engine
    #[arg(long, global = true, env = "PHISHLINK_ENGINE_PROGRAM", default_value = DEFAULT_ENGINE_PROGRAM)]
    pub engine_program: String,

    /// Argument passed to the engine program (repeatable)
    #[arg(
        long = "engine-arg",
        global = true,
        allow_hyphen_values = true,
        default_value = DEFAULT_ENGINE_SCRIPT
    )]
    pub engine_args: Vec<String>,

    /// Working directory for the engine process
    #[arg(long, global = true, env = "PHISHLINK_ENGINE_DIR")]
    pub engine_dir: Option<PathBuf>,

    /// Maximum seconds a single engine execution may run
    #[arg(long, global = true, env = "PHISHLINK_ENGINE_TIMEOUT", default_value_t = DEFAULT_ENGINE_TIMEOUT_SECS)]
    pub engine_timeout_seconds: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "PHISHLINK_BIND", default_value = DEFAULT_BIND)]
        bind: String,

        /// Port to listen on
        #[arg(long, env = "PHISHLINK_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Analyze one URL and print the result as JSON
    Analyze {
        /// URL to assess
        url: String,

        /// Also store the result in history
        #[arg(long)]
        remember: bool,
    },
    /// Inspect or prune report history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Print every stored report
    List,
    /// Print one report
    Show { id: i64 },
    /// Delete one report
    Delete { id: i64 },
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use phishlink::Config;
///
/// let config = Config {
///     engine_args: vec!["./engine/scanner.py".to_string()],
///     port: 8080,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    pub db_path: PathBuf,
    pub engine_program: String,
    pub engine_args: Vec<String>,
    pub engine_dir: Option<PathBuf>,
    pub engine_timeout_seconds: u64,
    pub bind: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            engine_program: DEFAULT_ENGINE_PROGRAM.to_string(),
            engine_args: vec![DEFAULT_ENGINE_SCRIPT.to_string()],
            engine_dir: None,
            engine_timeout_seconds: DEFAULT_ENGINE_TIMEOUT_SECS,
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            log_level: opt.log_level,
            log_format: opt.log_format,
            db_path: opt.db_path,
            engine_program: opt.engine_program,
            engine_args: opt.engine_args,
            engine_dir: opt.engine_dir,
            engine_timeout_seconds: opt.engine_timeout_seconds,
            ..Default::default()
        }
    }
}

/// A configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Checks values that clap cannot constrain on its own.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.engine_program.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "engine_program",
                message: "engine program must not be empty".to_string(),
            });
        }
        if self.engine_timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "engine_timeout_seconds",
                message: "engine timeout must be greater than 0".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigValidationError {
                field: "port",
                message: "port must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Engine launch settings derived from this configuration.
    pub fn engine_command(&self) -> EngineCommand {
        let command = EngineCommand::new(self.engine_program.clone(), self.engine_args.clone())
            .with_timeout(Duration::from_secs(self.engine_timeout_seconds));
        match self.engine_dir {
            Some(ref dir) => command.with_working_dir(dir.clone()),
            None => command,
        }
    }
}
