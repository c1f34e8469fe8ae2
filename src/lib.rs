//! nanoid-cli library crate
//!
//! This crate provides the core functionality for the `nanoid-cli` binary. It
//! is organized into small modules: `generator` (the configured Nano ID
//! generator), `generate` (the generate command and its output loop),
//! `output` (stdout or file destination), `version` (build metadata) and
//! `error`. The binary `src/main.rs` calls `nanoid_cli::run()`.
//!
//! Public API
//!
//! - `run()` — CLI entrypoint used by the binary.
//!
//! See each module for detailed documentation on functions and behavior.

pub mod error;
pub mod generate;
pub mod generator;
pub mod output;
pub mod version;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};
use crate::generate::{GenerateRequest, run_generate};
use crate::generator::DEFAULT_LENGTH;

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Diagnostic log filter written to stderr (e.g. warn, debug, nanoid_cli=trace)
    #[arg(long = "log-level", global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one or more Nano IDs
    Generate {
        /// Identifier length in characters
        #[arg(
            short = 'l',
            long = "id-length",
            default_value_t = DEFAULT_LENGTH as i64,
            allow_negative_numbers = true
        )]
        length: i64,

        /// Characters to build identifiers from (defaults to the URL-safe set)
        #[arg(short = 'a', long = "alphabet")]
        alphabet: Option<String>,

        /// Number of identifiers to generate
        #[arg(
            short = 'c',
            long = "count",
            default_value_t = 1i64,
            allow_negative_numbers = true
        )]
        count: i64,

        /// Write identifiers to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Print a progress line for every generated identifier
        #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
        verbose: bool,
    },
    /// Print version and commit information
    Version,
}

/// Run the nanoid-cli CLI.
///
/// Parses arguments, initializes logging and dispatches to the command.
/// Errors are printed to stderr as `error: <message>` and the process exits
/// with code 1.
///
/// ```no_run
/// nanoid_cli::run(); // called from src/main.rs
/// ```
pub fn run() {
    let cli = Cli::parse();
    if let Err(e) = execute(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Generate {
            length,
            alphabet,
            count,
            output,
            verbose,
        } => {
            let request = GenerateRequest {
                length,
                alphabet,
                count,
                output,
                verbose,
            };
            tracing::debug!(?request, "generate");
            run_generate(&request)
        }
        Commands::Version => {
            println!("{}", version::render());
            Ok(())
        }
    }
}

/// Install a stderr subscriber filtered by `level`.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| Error::Logging(format!("invalid log filter {:?}: {}", level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
