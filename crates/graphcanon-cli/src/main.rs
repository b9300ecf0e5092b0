//! graphcanon CLI - canonical JSON, content digests and event dumps for JSON documents.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{digest, events, json, pair};

#[derive(Parser)]
#[command(name = "graphcanon")]
#[command(about = "Canonical JSON rendering and content hashing for JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input JSON file (or stdin if not provided)
    pub input: Option<String>,
    /// Treat RFC 3339 strings as timestamps (normalized to UTC, millisecond precision)
    #[arg(long)]
    pub timestamps: bool,
    /// Reject documents nested deeper than N containers (default: unlimited)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print canonical JSON
    Json {
        #[command(flatten)]
        input: InputArgs,
        /// Spaces per indentation level (0 = compact)
        #[arg(long, default_value_t = 0)]
        indent: usize,
    },
    /// Print the base-58 content digest
    Digest {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print canonical JSON and digest together as a JSON object
    Pair {
        #[command(flatten)]
        input: InputArgs,
        /// Spaces per indentation level for the embedded JSON (0 = compact)
        #[arg(long, default_value_t = 0)]
        indent: usize,
    },
    /// Print the event stream, one event per line
    Events {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Json { input, indent } => json::run(input, indent),
        Commands::Digest { input } => digest::run(input),
        Commands::Pair { input, indent } => pair::run(input, indent),
        Commands::Events { input } => events::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
