//! Adapter interfaces for external systems.
//!
//! The fetch pipeline only needs "give me the bytes at this URL". Keeping
//! that behind a trait lets tests run the pipeline without a network.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

// Re-export the HTTP adapter
pub use http::HttpFetcher;

/// Errors retrieving a URL
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Trait for retrieving remote payloads
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Download the full body at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}
