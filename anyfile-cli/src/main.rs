// SPDX-License-Identifier: AGPL-3.0-or-later
//! anyfile CLI
//!
//! Inspect and manipulate filesystem entries by kind.

mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anyfile")]
#[command(author, version, about = "anyfile - typed filesystem entries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Path to list (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// Show all files including hidden
        #[arg(short, long)]
        all: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Display file contents
    Cat {
        /// File to display
        path: String,
    },

    /// Move or rename an entry
    Mv {
        /// Source path
        source: String,

        /// Destination path; an existing directory receives the source
        dest: String,
    },

    /// Remove files or directories
    Rm {
        /// Path(s) to remove
        #[arg(required = true)]
        paths: Vec<String>,

        /// Remove directories and their contents
        #[arg(short, long)]
        recursive: bool,
    },

    /// Create directories
    Mkdir {
        /// Directory path(s) to create
        #[arg(required = true)]
        paths: Vec<String>,

        /// Create parent directories as needed
        #[arg(short, long)]
        parents: bool,

        /// Permission bits, in octal
        #[arg(short, long, value_parser = commands::parse_mode)]
        mode: Option<u32>,
    },

    /// Show entry kind and metadata
    Stat {
        /// Path to inspect
        path: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Ls { path, long, all, human } => {
            commands::ls(&path, long, all, human).await
        }
        Commands::Cat { path } => {
            commands::cat(&path).await
        }
        Commands::Mv { source, dest } => {
            commands::mv(&source, &dest).await
        }
        Commands::Rm { paths, recursive } => {
            commands::rm(&paths, recursive).await
        }
        Commands::Mkdir { paths, parents, mode } => {
            commands::mkdir(&paths, parents, mode).await
        }
        Commands::Stat { path, json } => {
            commands::stat(&path, json).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
