use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the fetch capability.
///
/// A fetch error is local to the URL that produced it: it travels inside
/// the crawl result for that URL and never aborts other in-flight work.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("non-success HTTP status code {code}")]
    Status { code: u16 },

    /// The request failed before a usable response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The URL could not be parsed to derive a target host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
