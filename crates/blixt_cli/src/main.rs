//! Blixt CLI
//!
//! Command-line tools for inspecting how documents are indexed.
//!
//! Every command loads a blueprint and a JSON-lines document file into a
//! fresh in-memory index, then reports on the result.
//!
//! # Commands
//!
//! - `stats` - Display per-table row counts after ingestion
//! - `lookup` - Display the postings of the words of a term
//! - `version` - Display version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Blixt command-line indexing tools.
#[derive(Parser)]
#[command(name = "blixt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display per-table row counts after ingesting the documents
    Stats {
        /// Blueprint file (JSON)
        #[arg(short, long)]
        blueprint: PathBuf,

        /// Documents file (JSON lines)
        #[arg(short, long)]
        documents: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display the postings of a term after ingesting the documents
    Lookup {
        /// Blueprint file (JSON)
        #[arg(short, long)]
        blueprint: PathBuf,

        /// Documents file (JSON lines)
        #[arg(short, long)]
        documents: PathBuf,

        /// Text to look up
        #[arg(short, long)]
        term: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Stats {
            blueprint,
            documents,
            format,
        } => {
            commands::stats::run(&blueprint, &documents, &format)?;
        }
        Commands::Lookup {
            blueprint,
            documents,
            term,
            format,
        } => {
            commands::lookup::run(&blueprint, &documents, &term, &format)?;
        }
        Commands::Version => {
            println!("Blixt CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Blixt Core v{}", blixt_core::VERSION);
        }
    }

    Ok(())
}
