//! Tests for CLI parsing into library configuration.

use clap::Parser;
use phishlink::{Cli, Command, Config, HistoryCommand};
use std::path::PathBuf;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["phishlink", "serve"]).unwrap();
    match cli.command {
        Command::Serve { bind, port } => {
            assert_eq!(bind, "127.0.0.1");
            assert_eq!(port, 3000);
        }
        other => panic!("expected serve, got {:?}", other),
    }
    let config = Config::from(cli.options);
    assert_eq!(config.engine_args, vec!["scanner.py".to_string()]);
    assert_eq!(config.engine_timeout_seconds, 30);
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "phishlink",
        "analyze",
        "https://a.test",
        "--remember",
        "--engine-program",
        "python",
        "--engine-arg",
        "backend/scanner.py",
        "--db-path",
        "/tmp/history.db",
    ])
    .unwrap();
    match cli.command {
        Command::Analyze { ref url, remember } => {
            assert_eq!(url, "https://a.test");
            assert!(remember);
        }
        ref other => panic!("expected analyze, got {:?}", other),
    }
    let config = Config::from(cli.options);
    assert_eq!(config.engine_program, "python");
    assert_eq!(config.engine_args, vec!["backend/scanner.py".to_string()]);
    assert_eq!(config.db_path, PathBuf::from("/tmp/history.db"));
}

#[test]
fn test_history_subcommands() {
    let cli = Cli::try_parse_from(["phishlink", "history", "delete", "12"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::History {
            action: HistoryCommand::Delete { id: 12 }
        }
    ));
    let cli = Cli::try_parse_from(["phishlink", "history", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::History {
            action: HistoryCommand::List
        }
    ));
}

#[test]
fn test_analyze_requires_url() {
    assert!(Cli::try_parse_from(["phishlink", "analyze"]).is_err());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    assert!(Cli::try_parse_from(["phishlink", "--log-level", "loud", "serve"]).is_err());
}

#[test]
fn test_engine_args_accept_interpreter_flags() {
    let cli = Cli::try_parse_from([
        "phishlink",
        "--engine-arg",
        "-u",
        "--engine-arg",
        "scanner.py",
        "serve",
    ])
    .unwrap();
    let config = Config::from(cli.options);
    assert_eq!(
        config.engine_args,
        vec!["-u".to_string(), "scanner.py".to_string()]
    );
}
