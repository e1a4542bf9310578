pub mod cli;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod utils;

pub use crawler::{start_crawl, CrawlResult, Crawler, Resource};
pub use error::FetchError;
pub use fetch::{HttpFetcher, LinkExtractor, LinkFetcher};
