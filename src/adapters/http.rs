//! reqwest-backed fetcher.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{Fetcher, TransportError};

/// HTTP client for feed and torrent downloads
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with the client's default timeouts
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a fetcher with a per-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_a_request_error() {
        let fetcher = HttpFetcher::new();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, TransportError::Request { .. }));
    }

    #[test]
    fn test_with_timeout_builds() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(fetcher.name(), "http");
    }
}
