//! Decision Sim CLI
//!
//! # Commands
//!
//! - `sim simulate --input <file>` - probability of exceeding a threshold
//! - `sim analyze --input <file>` - decision outcome distribution and drivers
//! - `sim check` - engine version and input limits
//!
//! Logs go to stderr so command output can be piped.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Monte Carlo decision simulation
#[derive(Parser)]
#[command(name = "sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the probability that weighted assumptions exceed a threshold
    Simulate {
        /// Path to a JSON file with assumptions, iterations and threshold
        #[arg(short, long)]
        input: String,

        /// Seed for a reproducible run (overrides the file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Analyse a decision over bounded variables
    Analyze {
        /// Path to a JSON file with decision_name and variables
        #[arg(short, long)]
        input: String,

        /// Number of base-run trials (overrides the file)
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Seed for a reproducible run (overrides the file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print engine version and input limits
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Simulate {
            input,
            seed,
            format,
        } => commands::simulate::run(&input, seed, &format),
        Commands::Analyze {
            input,
            iterations,
            seed,
            format,
        } => commands::analyze::run(&input, iterations, seed, &format),
        Commands::Check => commands::check::run(),
    }
}
