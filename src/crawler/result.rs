use serde::Serialize;

use crate::error::FetchError;

/// A fetched page and the on-host links discovered in it.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// URL that was crawled
    pub url: String,

    /// Links discovered in the body, restricted to the target host
    pub links: Vec<String>,
}

/// Outcome of processing one dispatched URL.
///
/// Exactly one of these is produced per admitted URL, unless the crawl is
/// stopped while the fetch is still in flight.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    /// The fetched resource
    #[serde(flatten)]
    pub resource: Resource,

    /// Error encountered while fetching; when set, `links` is empty
    pub error: Option<FetchError>,
}

impl CrawlResult {
    /// Result for a successful fetch.
    pub fn ok(url: String, links: Vec<String>) -> Self {
        Self {
            resource: Resource { url, links },
            error: None,
        }
    }

    /// Result for a failed fetch. Carries no links.
    pub fn failed(url: String, error: FetchError) -> Self {
        Self {
            resource: Resource {
                url,
                links: Vec::new(),
            },
            error: Some(error),
        }
    }
}
