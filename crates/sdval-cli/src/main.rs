//! # sdval CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber on stderr
//! and dispatches to the subcommand handlers in `sdval_cli`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdval_cli::validate::{run_types, run_validate, ValidateArgs};

/// Structured-data validator
///
/// Checks JSON-LD, microdata and RDFa entities extracted from a page against
/// per-type rule-sets and, with a vocabulary, the schema.org type hierarchy.
#[derive(Parser, Debug)]
#[command(name = "sdval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an extracted structured-data document.
    Validate(ValidateArgs),

    /// List the type names with registered rule-sets.
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, config),
        Commands::Types => run_types(config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
