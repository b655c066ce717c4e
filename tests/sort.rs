//! Sort Pass Integration Tests
//!
//! Runs the sort pipeline against real temporary directories.

use std::path::Path;

use getanime::config::SortConfig;
use getanime::core::{sort_directory, SortError};
use getanime::domain::{Outcome, SkipReason};
use getanime::media::ReleaseNameParser;
use tempfile::TempDir;
use tokio::fs;

async fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), name.as_bytes()).await.unwrap();
}

fn config_for(dir: &TempDir) -> SortConfig {
    SortConfig {
        dir: dir.path().to_path_buf(),
    }
}

#[tokio::test]
async fn test_moves_episode_into_series_directory() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "[GroupX] My Show - 05 [720p].mkv").await;

    let report = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();

    let expected = temp
        .path()
        .join("My Show")
        .join("05 - My Show [GroupX] [720p].mkv");
    assert_eq!(report.completed(), 1);
    assert_eq!(report.destinations(), vec![&expected]);
    assert!(expected.is_file());
    assert!(!temp.path().join("[GroupX] My Show - 05 [720p].mkv").exists());

    // Contents travel with the move
    let content = fs::read_to_string(&expected).await.unwrap();
    assert_eq!(content, "[GroupX] My Show - 05 [720p].mkv");
}

#[tokio::test]
async fn test_second_pass_moves_nothing() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "[GroupX] My Show - 05 [720p].mkv").await;
    touch(temp.path(), "[GroupX] My Show - 06 [720p].mkv").await;

    let first = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();
    assert_eq!(first.completed(), 2);

    let second = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();
    assert!(second.items.is_empty());
    assert_eq!(second.completed(), 0);

    let mut sorted = Vec::new();
    let mut entries = fs::read_dir(temp.path().join("My Show")).await.unwrap();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        sorted.push(entry.file_name().into_string().unwrap());
    }
    sorted.sort();
    assert_eq!(
        sorted,
        vec![
            "05 - My Show [GroupX] [720p].mkv",
            "06 - My Show [GroupX] [720p].mkv",
        ]
    );
}

#[tokio::test]
async fn test_unparsable_file_does_not_stop_the_pass() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "[GroupX] 05 [1080p].mkv").await;
    touch(temp.path(), "[GroupX] My Show - 05 [720p].mkv").await;
    touch(temp.path(), "[Other] Second Show - 12 [1080p].mkv").await;

    let report = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();

    assert_eq!(report.completed(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 0);

    let skipped = report
        .items
        .iter()
        .find(|item| item.name == "[GroupX] 05 [1080p].mkv")
        .unwrap();
    assert!(matches!(
        skipped.outcome,
        Outcome::Skipped {
            reason: SkipReason::Unparsable(_)
        }
    ));

    assert!(temp.path().join("[GroupX] 05 [1080p].mkv").is_file());
    assert!(temp
        .path()
        .join("Second Show")
        .join("12 - Second Show [Other] [1080p].mkv")
        .is_file());
}

#[tokio::test]
async fn test_existing_destination_is_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let series = temp.path().join("My Show");
    fs::create_dir(&series).await.unwrap();
    let destination = series.join("05 - My Show [GroupX] [720p].mkv");
    fs::write(&destination, b"already sorted").await.unwrap();

    touch(temp.path(), "[GroupX] My Show - 05 [720p].mkv").await;

    let report = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();

    assert_eq!(report.completed(), 0);
    assert_eq!(report.skipped(), 1);
    assert_eq!(
        report.items[0].outcome,
        Outcome::Skipped {
            reason: SkipReason::AlreadyExists(destination.clone())
        }
    );

    // Both copies are left exactly as they were
    assert_eq!(fs::read(&destination).await.unwrap(), b"already sorted");
    assert!(temp.path().join("[GroupX] My Show - 05 [720p].mkv").is_file());
}

#[tokio::test]
async fn test_series_path_blocked_by_file_fails_only_that_item() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("My Show"), b"not a directory")
        .await
        .unwrap();
    touch(temp.path(), "[GroupX] My Show - 05 [720p].mkv").await;
    touch(temp.path(), "[Other] Second Show - 01 [1080p].mkv").await;

    let report = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.completed(), 1);

    let failed = report
        .items
        .iter()
        .find(|item| item.name == "[GroupX] My Show - 05 [720p].mkv")
        .unwrap();
    assert!(matches!(failed.outcome, Outcome::Failed { .. }));
    assert!(temp.path().join("[GroupX] My Show - 05 [720p].mkv").is_file());
}

#[tokio::test]
async fn test_only_visible_mkv_files_are_considered() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), ".[GroupX] Hidden Show - 01 [720p].mkv").await;
    touch(temp.path(), "[GroupX] Other Format - 01 [720p].mp4").await;
    touch(temp.path(), "notes.txt").await;
    fs::create_dir(temp.path().join("[GroupX] Folder Show - 01 [720p].mkv"))
        .await
        .unwrap();

    let report = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();

    assert!(report.items.is_empty());
    assert!(temp.path().join(".[GroupX] Hidden Show - 01 [720p].mkv").exists());
    assert!(temp.path().join("[GroupX] Other Format - 01 [720p].mp4").exists());
    assert!(!temp.path().join("Hidden Show").exists());
    assert!(!temp.path().join("Folder Show").exists());
}

#[tokio::test]
async fn test_missing_or_empty_directory_is_fatal() {
    let temp = TempDir::new().unwrap();

    let missing = SortConfig {
        dir: temp.path().join("does-not-exist"),
    };
    let err = sort_directory(&missing, &ReleaseNameParser)
        .await
        .unwrap_err();
    assert!(matches!(err, SortError::DirectoryNotFound(_)));

    let empty = SortConfig {
        dir: Default::default(),
    };
    let err = sort_directory(&empty, &ReleaseNameParser)
        .await
        .unwrap_err();
    assert!(matches!(err, SortError::EmptyPath));
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_name_is_reported_and_left_in_place() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let raw = OsStr::from_bytes(b"[GroupX] Bad \xff Name - 01 [720p].mkv");
    fs::write(temp.path().join(raw), b"x").await.unwrap();
    touch(temp.path(), "[GroupX] My Show - 05 [720p].mkv").await;

    let report = sort_directory(&config_for(&temp), &ReleaseNameParser)
        .await
        .unwrap();

    assert_eq!(report.items.len(), 2);
    assert_eq!(report.completed(), 1);
    let skipped = report
        .items
        .iter()
        .find(|item| item.name.contains("Bad"))
        .unwrap();
    assert_eq!(
        skipped.outcome,
        Outcome::Skipped {
            reason: SkipReason::NonUtf8Name
        }
    );
    assert!(temp.path().join(raw).is_file());
}
