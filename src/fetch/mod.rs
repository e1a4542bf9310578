pub mod extract;

// Re-export common types
pub use extract::LinkExtractor;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::cli::config::CrawlerSettings;
use crate::error::FetchError;

/// Capability for retrieving a URL and extracting its on-host links.
///
/// Implementations hold no crawl state and are safe to invoke concurrently
/// from any number of workers. Duplicate links in the returned sequence are
/// permitted; deduplication happens in the engine, not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    /// Retrieve `url` and return the on-host links found in its body.
    ///
    /// On a non-success response or a transport failure the error describes
    /// what went wrong and no links are returned.
    async fn fetch(&self, url: &str) -> Result<Vec<String>, FetchError>;
}

/// HTTP fetcher restricted to a single target host.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    extractor: LinkExtractor,
}

impl HttpFetcher {
    /// Build a fetcher whose extracted links are restricted to `host`.
    pub fn new(host: &str, settings: &CrawlerSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            extractor: LinkExtractor::new(host),
        })
    }

    /// Build a fetcher whose target host is derived from the seed URL.
    pub fn for_seed(seed_url: &str, settings: &CrawlerSettings) -> Result<Self, FetchError> {
        let parsed = Url::parse(seed_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", seed_url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl(format!("{}: missing host", seed_url)))?;

        Self::new(host, settings)
    }
}

#[async_trait]
impl LinkFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let links = self.extractor.links(&body);
        debug!("extracted {} links from {}", links.len(), url);

        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> CrawlerSettings {
        CrawlerSettings {
            request_timeout_secs: 2,
            ..CrawlerSettings::default()
        }
    }

    #[tokio::test]
    async fn returns_extracted_links_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "a https://mydomain.com/first then https://mydomain.com/second",
            ))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("mydomain.com", &settings()).unwrap();
        let links = fetcher.fetch(&format!("{}/", server.uri())).await.unwrap();

        assert_eq!(
            links,
            vec!["https://mydomain.com/first", "https://mydomain.com/second"]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("some body"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("mydomain.com", &settings()).unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();

        assert_eq!(err, FetchError::Status { code: 404 });
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let fetcher = HttpFetcher::new("mydomain.com", &settings()).unwrap();

        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn seed_without_host_is_rejected() {
        let err = HttpFetcher::for_seed("data:text/plain,hello", &settings()).unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn invalid_seed_is_rejected() {
        let err = HttpFetcher::for_seed("not a url", &settings()).unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
