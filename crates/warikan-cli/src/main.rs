//! warikan CLI — inclined bill splitting from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "warikan", version, about = "Inclined bill splitter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a bill across ranked roles
    Split {
        /// Path to a .toml request file
        #[arg(long, conflicts_with = "role")]
        request: Option<PathBuf>,

        /// Role as NAME:COUNT, highest rank first (repeatable)
        #[arg(long)]
        role: Vec<String>,

        /// Total amount to collect (overrides the request file)
        #[arg(long, allow_negative_numbers = true)]
        total: Option<i64>,

        /// Tilt to start the search from, 0-100
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        tilt: Option<u8>,

        /// Role whose payment absorbs the rounding residue
        #[arg(long)]
        payer: Option<String>,

        /// Never accept a schedule that collects less than the total
        #[arg(long)]
        shortfall_skip: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also save the JSON report under the configured output directory
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate request TOML files
    Validate {
        /// Path to request file or directory
        #[arg(long)]
        request: PathBuf,
    },

    /// Create starter config and example request
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warikan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split {
            request,
            role,
            total,
            tilt,
            payer,
            shortfall_skip,
            format,
            output,
            save,
            config,
        } => commands::split::execute(
            request,
            role,
            total,
            tilt,
            payer,
            shortfall_skip,
            format,
            output,
            save,
            config,
        ),
        Commands::Validate { request } => commands::validate::execute(request),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
