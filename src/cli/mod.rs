pub mod commands;
pub mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file in addition to stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a host starting from a seed URL
    Crawl {
        /// Seed URL to start crawling from (eg, https://example.com)
        #[arg(required = true)]
        url: String,

        /// Configuration file to load
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of concurrently outstanding fetches
        #[arg(short, long)]
        max_concurrent: Option<usize>,

        /// Per-request HTTP timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Stop the crawl after this many seconds (default: run until Ctrl-C)
        #[arg(short, long)]
        run_for: Option<u64>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Extract on-host links from a document without crawling
    Extract {
        /// Target host to restrict links to
        #[arg(required = true)]
        host: String,

        /// File to read the document from (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Configuration file to load
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse command line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Process the command
pub async fn process_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Crawl {
            url,
            config,
            max_concurrent,
            timeout,
            run_for,
            json,
        } => {
            info!("Starting crawl on {}", url);
            commands::crawl(url, config, max_concurrent, timeout, run_for, json).await
        }
        Commands::Extract { host, input } => commands::extract(host, input),
        Commands::Config { config } => commands::show_config(config),
    }
}
