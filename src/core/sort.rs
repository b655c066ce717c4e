//! Sort pass: move media files into per-series directories.
//!
//! `<dir>/[GroupX] My Show - 05 [720p].mkv` ends up at
//! `<dir>/My Show/05 - My Show [GroupX] [720p].mkv`. The destination's
//! existence is the only record of earlier passes, so re-running on a sorted
//! directory moves nothing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::config::SortConfig;
use crate::domain::{DirectoryEntry, ItemReport, PassReport, SkipReason};
use crate::media::{normalize, FilenameParser};

/// Errors that abort a sort pass before any file is touched
#[derive(Debug, Error)]
pub enum SortError {
    #[error("No directory to sort was given")]
    EmptyPath,

    #[error("Directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Unable to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the immediate entries of `dir` in the order the filesystem returns them
pub async fn list_entries(dir: &Path) -> std::io::Result<Vec<DirectoryEntry>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut listing = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let is_directory = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);

        let listed = match entry.file_name().into_string() {
            Ok(name) => DirectoryEntry::new(name, is_directory),
            Err(raw) => DirectoryEntry::lossy(raw.to_string_lossy(), is_directory),
        };
        listing.push(listed);
    }

    Ok(listing)
}

/// Sort every `.mkv` file directly inside `config.dir`.
///
/// Per-file problems (unparsable or non UTF-8 names, existing
/// destinations, failed moves) are recorded in the returned report and
/// never stop the pass.
pub async fn sort_directory(
    config: &SortConfig,
    parser: &dyn FilenameParser,
) -> Result<PassReport, SortError> {
    let dir = config.dir.as_path();
    if dir.as_os_str().is_empty() {
        return Err(SortError::EmptyPath);
    }
    if !fs::try_exists(dir).await.unwrap_or(false) {
        return Err(SortError::DirectoryNotFound(dir.to_path_buf()));
    }

    let listing = list_entries(dir).await.map_err(|source| SortError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let candidates: Vec<DirectoryEntry> = listing
        .into_iter()
        .filter(DirectoryEntry::is_sort_candidate)
        .collect();

    info!(dir = %dir.display(), files = candidates.len(), "Sorting media files");

    let mut report = PassReport::new();
    for (index, entry) in candidates.iter().enumerate() {
        report.push(sort_entry(dir, index, entry, parser).await);
    }

    info!(dir = %dir.display(), "Sort finished: {}", report);
    Ok(report)
}

async fn sort_entry(
    dir: &Path,
    index: usize,
    entry: &DirectoryEntry,
    parser: &dyn FilenameParser,
) -> ItemReport {
    let name = entry.name.as_str();

    if !entry.utf8_name {
        warn!(index, file = name, "Skipping non UTF-8 file name");
        return ItemReport::skipped(index, name, SkipReason::NonUtf8Name);
    }

    let info = match parser.parse(name) {
        Ok(info) => info,
        Err(e) => {
            warn!(index, file = name, error = %e, "Unable to parse file name");
            return ItemReport::skipped(index, name, SkipReason::Unparsable(e.to_string()));
        }
    };

    // Series title doubles as the directory name
    let series_dir = dir.join(&info.series_title);
    match fs::create_dir(&series_dir).await {
        Ok(()) => debug!(index, path = %series_dir.display(), "Created series directory"),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let is_dir = fs::metadata(&series_dir)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if !is_dir {
                warn!(
                    index,
                    path = %series_dir.display(),
                    "Series path exists but is not a directory"
                );
            }
        }
        Err(e) => {
            warn!(
                index,
                path = %series_dir.display(),
                error = %e,
                "Unable to create series directory"
            );
        }
    }

    let source = dir.join(name);
    let destination = series_dir.join(normalize(&info));

    if fs::metadata(&destination).await.is_ok() {
        info!(index, destination = %destination.display(), "Already exists, skip moving");
        return ItemReport::skipped(index, name, SkipReason::AlreadyExists(destination));
    }

    info!(
        index,
        from = %source.display(),
        to = %destination.display(),
        "Moving file"
    );

    match fs::rename(&source, &destination).await {
        Ok(()) => ItemReport::completed(index, name, destination),
        Err(e) => {
            error!(
                index,
                from = %source.display(),
                to = %destination.display(),
                error = %e,
                "Error moving file"
            );
            ItemReport::failed(
                index,
                name,
                format!("move to {} failed: {}", destination.display(), e),
            )
        }
    }
}
