//! Domain types for getanime.
//!
//! This module contains the core data structures:
//! - FeedItem: Entries decoded from the RSS feed
//! - DirectoryEntry: Files considered by the sort pass
//! - PassReport: Per-item outcomes of a pipeline pass

pub mod entry;
pub mod feed;
pub mod report;

// Re-export commonly used types
pub use entry::{DirectoryEntry, MEDIA_SUFFIX};
pub use feed::{decode_feed, FeedDecodeError, FeedItem};
pub use report::{ItemReport, Outcome, PassReport, SkipReason};
