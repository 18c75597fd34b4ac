//! riffwave CLI - Command-line inspector for RIFF/WAVE files
//!
//! Validates WAV headers and prints the decoded fields, for one file or a directory tree.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

use riffwave_cli::{commands, config, logging};

/// riffwave - RIFF/WAVE header validator
#[derive(Parser)]
#[command(name = "riffwave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log parser diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a WAV file (or a directory of them) and print its header
    Inspect {
        /// Path to the WAV file to inspect
        #[arg(short, long, conflicts_with = "input_dir")]
        input: Option<String>,

        /// Directory to recursively scan for .wav and .wave files (batch mode)
        #[arg(long)]
        input_dir: Option<String>,

        /// JSON file with parser options (data_bounds, expected_mime)
        #[arg(short, long)]
        config: Option<String>,

        /// Slice the data region with the size as an absolute end offset
        #[arg(long)]
        legacy_bounds: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Inspect {
            input,
            input_dir,
            config: config_path,
            legacy_bounds,
            json,
        } => config::load_parse_options(config_path.as_deref(), legacy_bounds).and_then(|options| {
            commands::inspect::run(input.as_deref(), input_dir.as_deref(), &options, json)
        }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
