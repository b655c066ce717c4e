//! Core pipelines.
//!
//! This module contains:
//! - Fetch: feed → download → idempotent write of .torrent files
//! - Sort: directory listing → parse → idempotent move into series folders

pub mod fetch;
pub mod sort;

// Re-export commonly used types
pub use fetch::{fetch_and_save, torrent_path, FetchError};
pub use sort::{list_entries, sort_directory, SortError};
