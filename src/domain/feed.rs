//! Feed items and feed decoding.
//!
//! Only RSS 2.0 documents (`rss > channel > item`) are accepted. Anything
//! else is a decode error and aborts the fetch pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One downloadable entry from the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Item title (used for logging)
    pub title: String,

    /// URL of the payload to download
    pub link: String,

    /// Release name, used as the saved file's stem
    pub description: String,

    /// Feed-assigned identifier
    pub guid: String,
}

/// Errors decoding a feed document
#[derive(Debug, Error)]
pub enum FeedDecodeError {
    #[error("Feed is not valid RSS: {0}")]
    Rss(#[from] rss::Error),
}

impl From<&rss::Item> for FeedItem {
    fn from(item: &rss::Item) -> Self {
        Self {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            description: item.description().unwrap_or_default().to_string(),
            guid: item.guid().map(|g| g.value().to_string()).unwrap_or_default(),
        }
    }
}

/// Decode a feed document into its items, preserving feed order
pub fn decode_feed(content: &[u8]) -> Result<Vec<FeedItem>, FeedDecodeError> {
    let channel = rss::Channel::read_from(content)?;
    Ok(channel.items().iter().map(FeedItem::from).collect())
}
