//! # carbon-tools Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the carbon-tools CLI, the developer tooling shipped with
//! the Carbon C++ project template. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//! - Mapping errors to the process exit status
//!
//! ## Examples
//!
//! ```bash
//! # Check formatting of everything below src/
//! carbon-tools format --directory src
//!
//! # Provision a fresh checkout with debug logging
//! carbon-tools -vv setup
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Print any error and exit with its status (a failed formatter's own
//!    exit code, otherwise 1)
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // format and setup
mod common; // process, filesystem, network and archive helpers
mod core; // config, errors and versions

use crate::core::error::CarbonError;

#[derive(Parser, Debug)]
#[command(
    name = "carbon-tools",
    about = "Developer tooling for Carbon C++ projects",
    long_about = "Formats C/C++ sources and CMake files, and provisions fresh checkouts\n\
                  (build directories, git hooks, submodules, dependencies, CMake).",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "f")]
    Format(commands::format::FormatArgs),
    #[command(alias = "s")]
    Setup(commands::setup::SetupArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Format(args) => commands::format::handle_format(args).await,
        Commands::Setup(args) => commands::setup::handle_setup(args).await,
    };

    if let Err(e) = command_result {
        std::process::exit(report_failure(&e));
    }

    Ok(())
}

/// Prints a failed command's error and returns the process exit code.
///
/// A failing formatter has already written its own diagnostics, so only its
/// status is propagated; the error itself is logged at debug level.
fn report_failure(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<CarbonError>() {
        Some(failed @ CarbonError::FormatterFailed { .. }) => {
            tracing::debug!("{}", failed);
            failed.exit_code()
        }
        other => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            other.map_or(1, CarbonError::exit_code)
        }
    }
}
