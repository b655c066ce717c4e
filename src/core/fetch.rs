//! Fetch pass: save every feed item's payload as `<description>.torrent`.
//!
//! Each item is downloaded before its destination is checked. A failed
//! download stops the remaining items, even when the item was saved by an
//! earlier pass. A failed write only fails the current one.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{error, info, warn};

use crate::adapters::{Fetcher, TransportError};
use crate::config::FetchConfig;
use crate::domain::{decode_feed, FeedDecodeError, ItemReport, PassReport, SkipReason};

/// Extension appended to the item description
pub const TORRENT_EXTENSION: &str = "torrent";

/// Errors that abort a fetch pass
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Directory to save doesn't exist: {0}")]
    SaveDirNotFound(PathBuf),

    #[error("Unable to get feed: {0}")]
    Feed(#[source] TransportError),

    #[error("Unable to decode feed: {0}")]
    Decode(#[from] FeedDecodeError),
}

/// Destination for an item, or `None` when the description is blank.
///
/// Surrounding whitespace is trimmed from the description, so `" Show "`
/// is saved as `Show.torrent`. Path separators inside it are replaced with
/// `_` so the file always lands directly in `save_dir`.
pub fn torrent_path(save_dir: &Path, description: &str) -> Option<PathBuf> {
    let stem = description.trim().replace(['/', '\\'], "_");
    if stem.is_empty() {
        return None;
    }
    Some(save_dir.join(format!("{}.{}", stem, TORRENT_EXTENSION)))
}

/// Download the feed at `config.feed_url` and save each item into `config.save_dir`.
pub async fn fetch_and_save(
    config: &FetchConfig,
    fetcher: &dyn Fetcher,
) -> Result<PassReport, FetchError> {
    // Checked before touching the network
    let save_dir_ok = fs::metadata(&config.save_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !save_dir_ok {
        return Err(FetchError::SaveDirNotFound(config.save_dir.clone()));
    }

    info!(url = %config.feed_url, fetcher = fetcher.name(), "Fetching feed");
    let content = fetcher
        .fetch(&config.feed_url)
        .await
        .map_err(FetchError::Feed)?;
    let items = decode_feed(&content)?;
    info!(items = items.len(), "Feed decoded");

    let mut report = PassReport::new();

    for (index, item) in items.iter().enumerate() {
        info!(index, title = %item.title, link = %item.link, "Feed item");

        let torrent = match fetcher.fetch(&item.link).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(index, title = %item.title, error = %e, "Unable to download, stopping");
                report.push(ItemReport::failed(index, &item.title, e.to_string()));
                report.halted = true;
                break;
            }
        };

        let Some(destination) = torrent_path(&config.save_dir, &item.description) else {
            warn!(index, title = %item.title, "Item has no description, skipping");
            report.push(ItemReport::skipped(index, &item.title, SkipReason::EmptyName));
            continue;
        };

        if fs::try_exists(&destination).await.unwrap_or(false) {
            info!(index, path = %destination.display(), "Already exists");
            report.push(ItemReport::skipped(
                index,
                &item.title,
                SkipReason::AlreadyExists(destination),
            ));
            continue;
        }

        info!(index, path = %destination.display(), bytes = torrent.len(), "Saving");
        match fs::write(&destination, &torrent).await {
            Ok(()) => report.push(ItemReport::completed(index, &item.title, destination)),
            Err(e) => {
                error!(index, path = %destination.display(), error = %e, "Unable to save");
                report.push(ItemReport::failed(
                    index,
                    &item.title,
                    format!("write to {} failed: {}", destination.display(), e),
                ));
            }
        }
    }

    info!("Fetch finished: {}", report);
    Ok(report)
}
