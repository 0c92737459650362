//! `propdev` command-line entry point.
//!
//! # Responsibility
//! - Read legacy or canonical project JSON from files or stdin.
//! - Expose normalize / validate / merge / summary over `propdev_core`.
//!
//! # Invariants
//! - Exit code 0 on success, 1 when a validated project is invalid, 2 on
//!   I/O, parse or logging failures.
//! - Results are written to stdout as pretty JSON; diagnostics go to stderr.

mod commands;

use clap::{Args, Parser, Subcommand};
use commands::CliError;
use propdev_core::{init_logging, LoggingConfig};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "propdev")]
#[command(version = propdev_core::core_version())]
#[command(about = "Normalize, validate and merge property-development project records")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Log level: trace|debug|info|warn|error (overrides PROPDEV_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides PROPDEV_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert legacy project JSON into the canonical shape
    Normalize(commands::NormalizeArgs),
    /// Normalize one record and print its validation report
    Validate(commands::InputArgs),
    /// Apply a partial update to a project record
    Merge(commands::MergeArgs),
    /// Import a batch into a session store and print portfolio figures
    Summary(commands::InputArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli.global) {
        eprintln!("propdev: {err}");
        return ExitCode::from(2);
    }

    let outcome = match cli.command {
        Commands::Normalize(args) => commands::normalize(&args),
        Commands::Validate(args) => commands::validate(&args),
        Commands::Merge(args) => commands::merge(&args),
        Commands::Summary(args) => commands::summary(&args),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={}", err);
            eprintln!("propdev: {err}");
            ExitCode::from(2)
        }
    }
}

fn start_logging(global: &GlobalArgs) -> Result<(), CliError> {
    match LoggingConfig::resolve(global.log_level.as_deref(), global.log_dir.as_deref()) {
        Some(config) => {
            let config = config.map_err(CliError::Logging)?;
            init_logging(&config).map_err(CliError::Logging)
        }
        None => Ok(()),
    }
}
