pub mod engine;
pub mod result;

// Re-export common types
pub use engine::{start_crawl, Crawler};
pub use result::{CrawlResult, Resource};
