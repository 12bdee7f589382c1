//! Fetch error type.

use thiserror::Error;

/// Failure to download a container. Transport problems and HTTP outcomes are
/// kept apart so the batch log says which one happened.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured endpoint could not be turned into a URL.
    #[error("invalid update URL: {0}")]
    Url(#[from] url::ParseError),

    /// libcurl reported an error (DNS, connect, TLS, timeout...).
    #[error("transfer failed: {0}")]
    Curl(#[from] curl::Error),

    /// Final response was not 200. The store answers 204 for unknown or
    /// unavailable extensions.
    #[error("HTTP {0}")]
    HttpStatus(u32),

    /// Body exceeded `max_download_bytes`.
    #[error("response larger than {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("empty response body")]
    Empty,
}
