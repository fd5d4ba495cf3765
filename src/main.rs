//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `phishlink` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use phishlink::initialization::init_logger_with;
use phishlink::{
    run_analyze, run_history, run_server, Cli, Command, Config, HistoryOutput,
};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = Config::from(cli.options);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match cli.command {
        Command::Serve { bind, port } => {
            config.bind = bind;
            config.port = port;
            run_server(config).await
        }
        Command::Analyze { url, remember } => {
            run_analyze(config, &url, remember).await.and_then(|outcome| {
                println!("{}", serde_json::to_string_pretty(&outcome.analysis)?);
                if let Some(report) = outcome.report {
                    eprintln!("Saved to history as report {}", report.id);
                }
                Ok(())
            })
        }
        Command::History { action } => run_history(config, action).await.and_then(print_history),
    };

    if let Err(e) = result {
        eprintln!("phishlink error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

fn print_history(output: HistoryOutput) -> Result<()> {
    match output {
        HistoryOutput::Reports(reports) if reports.is_empty() => {
            println!("No history reports yet.");
        }
        HistoryOutput::Reports(reports) => {
            for report in reports {
                println!(
                    "{:>6}  {:<12}  {:>3}  {}  {}",
                    report.id,
                    report.verdict,
                    report.score,
                    report.created_at.format("%Y-%m-%d %H:%M:%S"),
                    report.url
                );
            }
        }
        HistoryOutput::Report(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        HistoryOutput::Deleted(id) => println!("Report {} deleted", id),
    }
    Ok(())
}
