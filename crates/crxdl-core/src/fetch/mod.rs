//! Download of raw CRX containers.
//!
//! [`Fetcher`] is the seam the batch driver depends on; [`CurlFetcher`] is the
//! libcurl implementation that talks to the update endpoint.

mod error;

pub use error::FetchError;

use crate::config::HttpConfig;
use crate::extension_id::ExtensionId;
use crate::update_url::UpdateQuery;

/// Source of raw container bytes for an extension.
pub trait Fetcher {
    fn fetch(&self, id: &ExtensionId) -> Result<Vec<u8>, FetchError>;
}

/// Blocking GET through libcurl. One `Easy` handle per request; call from
/// `spawn_blocking` when driven from async code.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    query: UpdateQuery,
    http: HttpConfig,
}

impl CurlFetcher {
    pub fn new(query: UpdateQuery, http: HttpConfig) -> Self {
        Self { query, http }
    }

    pub fn query(&self) -> &UpdateQuery {
        &self.query
    }

    /// GET `url`, following redirects, and return the body.
    pub fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let limit = self.http.max_download_bytes;
        let mut body: Vec<u8> = Vec::new();
        let mut too_large = false;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.http.connect_timeout())?;
        easy.timeout(self.http.timeout())?;
        if let Some(ua) = &self.http.user_agent {
            easy.useragent(ua)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if body.len() as u64 + data.len() as u64 > limit {
                    too_large = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if too_large {
            return Err(FetchError::TooLarge { limit });
        }
        performed?;

        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::HttpStatus(code));
        }
        if body.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(body)
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, id: &ExtensionId) -> Result<Vec<u8>, FetchError> {
        let url = self.query.url_for(id)?;
        tracing::debug!(%id, %url, "GET");
        let body = self.get(url.as_str())?;
        tracing::debug!(%id, bytes = body.len(), "downloaded container");
        Ok(body)
    }
}
