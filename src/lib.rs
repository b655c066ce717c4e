//! getanime - Fetch torrents from an RSS feed and sort episodes by series
//!
//! Two independent passes, one per invocation:
//!
//! - **fetch**: download every item linked from an RSS feed and save it as
//!   `<savedir>/<description>.torrent`, skipping files that already exist
//! - **sort**: move `.mkv` files into `<dir>/<series>/` under a canonical,
//!   episode-first name
//!
//! Both passes are idempotent: the filesystem is the only state, and an
//! existing destination means "already done".
//!
//! # Modules
//!
//! - `adapters`: HTTP fetching behind the `Fetcher` trait
//! - `core`: The fetch and sort pipelines
//! - `domain`: Data structures (FeedItem, DirectoryEntry, PassReport)
//! - `media`: Release filename parsing and canonical naming
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Save torrents from a feed
//! getanime fetch --rss https://example.org/rss.xml --savedir ~/torrents
//!
//! # Sort finished downloads
//! getanime sort --dir ~/downloads
//!
//! # Preview how a filename would be renamed
//! getanime parse "[GroupX] My Show - 05 [720p].mkv"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod media;

// Re-export main types at crate root for convenience
pub use adapters::{Fetcher, HttpFetcher, TransportError};
pub use config::{FetchConfig, SortConfig};
pub use crate::core::{fetch_and_save, sort_directory, FetchError, SortError};
pub use domain::{FeedItem, ItemReport, Outcome, PassReport, SkipReason};
pub use media::{normalize, parse, FilenameParser, ParseError, ParsedMediaName, ReleaseNameParser};
