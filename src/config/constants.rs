//! Configuration constants used as defaults.

/// Default SQLite file for report history.
pub const DB_PATH: &str = "./phishlink.db";

/// Default program used to run the analysis engine.
pub const DEFAULT_ENGINE_PROGRAM: &str = "python3";

/// Default engine script passed to the engine program.
pub const DEFAULT_ENGINE_SCRIPT: &str = "scanner.py";

/// Upper bound on a single engine execution, in seconds.
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 30;

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;
