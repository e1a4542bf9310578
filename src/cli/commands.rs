use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use crate::cli::config::CrawlerConfig;
use crate::crawler::Crawler;
use crate::fetch::{HttpFetcher, LinkExtractor};

/// Crawl a host starting from a seed URL, printing one block per resource.
pub async fn crawl(
    url: String,
    config_path: Option<PathBuf>,
    max_concurrent: Option<usize>,
    timeout: Option<u64>,
    run_for: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    // Override configuration with command line parameters if provided
    if let Some(n) = max_concurrent {
        config.crawler.max_concurrent_fetches = n;
    }
    if let Some(t) = timeout {
        config.crawler.request_timeout_secs = t;
    }

    // An invalid seed URL is fatal here; the engine assumes a valid one.
    let seed = Url::parse(&url).context(format!("Invalid seed URL: {}", url))?;

    let fetcher = HttpFetcher::for_seed(seed.as_str(), &config.crawler)?;
    let crawler = Crawler::new(Arc::new(fetcher), config.crawler.clone());

    let stop = CancellationToken::new();
    let mut results = crawler.start(seed.to_string(), stop.clone());

    // Fire the stop signal on Ctrl-C, or after the wall-clock budget when
    // one was given. Termination policy lives here, not in the engine.
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            match run_for {
                Some(secs) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                    }
                }
                None => {
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
            stop.cancel();
        });
    }

    let mut crawled = 0usize;
    while let Some(result) = results.recv().await {
        crawled += 1;
        if json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            println!("{}", result.resource.url);
            if let Some(err) = &result.error {
                println!("  !! {}", err);
            }
            for link in &result.resource.links {
                println!("  -> {}", link);
            }
        }
    }

    info!("Crawl finished after {} resources", crawled);
    Ok(())
}

/// Run the link extractor over a document and print what it finds.
pub fn extract(host: String, input: Option<PathBuf>) -> Result<()> {
    let body = match input {
        Some(path) => fs::read_to_string(&path)
            .context(format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read document from stdin")?;
            buf
        }
    };

    let extractor = LinkExtractor::new(&host);
    for link in extractor.links(&body) {
        println!("{}", link);
    }

    Ok(())
}

/// Show the effective configuration
pub fn show_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    println!("{:#?}", config);

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<CrawlerConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("Configuration file not found: {}", path.display()));
            }
            CrawlerConfig::load_from_file(&path)
        }
        None => Ok(CrawlerConfig::default()),
    }
}
