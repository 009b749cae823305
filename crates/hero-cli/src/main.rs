//! # hero CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hero_cli::check::{run_check, CheckArgs};
use hero_cli::classify::{run_classify, ClassifyArgs};
use hero_cli::search::{run_search, SearchArgs};
use hero_cli::suite::{run_suite_command, SuiteArgs};

/// Superhero search API contract suite.
///
/// Searches the live API, validates saved response bodies, classifies
/// error bodies, and runs the scenario matrix.
#[derive(Parser, Debug)]
#[command(name = "hero", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the live API by hero name.
    Search(SearchArgs),

    /// Validate a saved search response body.
    Check(CheckArgs),

    /// Classify a saved error body.
    Classify(ClassifyArgs),

    /// Run the contract scenario matrix against the live API.
    Suite(SuiteArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        logs.json().init();
    } else {
        logs.init();
    }

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Check(args) => run_check(&args, &mut stdout),
        Commands::Classify(args) => run_classify(&args, &mut stdout),
        Commands::Search(args) => match hero_cli::client_from_env() {
            Ok(client) => run_search(&args, &client, &mut stdout).await,
            Err(e) => Err(e),
        },
        Commands::Suite(args) => match hero_cli::client_from_env() {
            Ok(client) => run_suite_command(&args, &client, &mut stdout).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
