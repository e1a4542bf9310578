use anyhow::Result;
use tracing::{error, info};

use host_crawler::cli;
use host_crawler::utils;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::parse_args();

    // Initialize logging
    utils::init_logging(args.verbose, args.log_file.clone())?;

    info!("Starting host-crawler v{}", env!("CARGO_PKG_VERSION"));

    // Process commands
    match cli::process_command(args).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e)
        }
    }
}
