//! Configuration for getanime.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI on top of the resolved config)
//! 2. Environment variables (GETANIME_RSS, GETANIME_SAVE_DIR, GETANIME_SORT_DIR,
//!    GETANIME_TIMEOUT_SECS)
//! 3. Config file (.getanime/config.yaml, then <user config dir>/getanime/config.yaml)
//! 4. Defaults (save into ./, sort .)
//!
//! Config file discovery:
//! - Searches current directory and parents for .getanime/config.yaml
//! - Paths in a project config file are relative to the directory holding .getanime/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Name of the per-project config directory
const CONFIG_DIR_NAME: &str = ".getanime";

const DEFAULT_SAVE_DIR: &str = "./";
const DEFAULT_SORT_DIR: &str = ".";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub fetch: FetchSection,
    #[serde(default)]
    pub sort: SortSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchSection {
    /// Feed URL
    pub rss: Option<String>,
    /// Where .torrent files are written (relative to the config file)
    pub save_dir: Option<String>,
    /// Per-request HTTP timeout
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortSection {
    /// Directory whose media files get sorted (relative to the config file)
    pub dir: Option<String>,
}

/// Resolved configuration, before command-line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub feed_url: Option<String>,
    pub save_dir: PathBuf,
    pub sort_dir: PathBuf,
    pub timeout_seconds: Option<u64>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            sort_dir: PathBuf::from(DEFAULT_SORT_DIR),
            timeout_seconds: None,
            config_file: None,
        }
    }
}

/// Settings for one fetch-and-save pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub feed_url: String,
    pub save_dir: PathBuf,
    pub timeout: Option<Duration>,
}

/// Settings for one sort pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub dir: PathBuf,
}

/// Errors turning the resolved config into pipeline settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No feed URL given (use --rss, GETANIME_RSS or fetch.rss in the config file)")]
    MissingFeedUrl,
}

impl ResolvedConfig {
    /// Build fetch settings, letting command-line values win
    pub fn fetch_config(
        &self,
        rss: Option<String>,
        save_dir: Option<PathBuf>,
    ) -> Result<FetchConfig, ConfigError> {
        let feed_url = non_empty(rss)
            .or_else(|| self.feed_url.clone())
            .ok_or(ConfigError::MissingFeedUrl)?;

        Ok(FetchConfig {
            feed_url,
            save_dir: save_dir.unwrap_or_else(|| self.save_dir.clone()),
            timeout: self.timeout_seconds.map(Duration::from_secs),
        })
    }

    /// Build sort settings, letting the command-line directory win
    pub fn sort_config(&self, dir: Option<PathBuf>) -> SortConfig {
        SortConfig {
            dir: dir.unwrap_or_else(|| self.sort_dir.clone()),
        }
    }
}

/// Find config file by searching current directory and parents, then the user config dir
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(CONFIG_DIR_NAME).join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("getanime").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Directory that relative paths in `config_path` are resolved against
fn config_base_dir(config_path: &Path) -> PathBuf {
    let parent = config_path.parent().unwrap_or(Path::new("."));
    if parent.file_name().is_some_and(|n| n == CONFIG_DIR_NAME) {
        parent.parent().unwrap_or(Path::new(".")).to_path_buf()
    } else {
        parent.to_path_buf()
    }
}

/// Resolve a path that may be relative to the config file's base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Merge a parsed config file and environment lookups over the defaults
fn resolve(
    file: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some((path, config)) = file {
        let base = config_base_dir(&path);

        resolved.feed_url = non_empty(config.fetch.rss);
        if let Some(dir) = non_empty(config.fetch.save_dir) {
            resolved.save_dir = resolve_path(&base, &dir);
        }
        if let Some(dir) = non_empty(config.sort.dir) {
            resolved.sort_dir = resolve_path(&base, &dir);
        }
        resolved.timeout_seconds = config.fetch.timeout_seconds;
        resolved.config_file = Some(path);
    }

    if let Some(url) = non_empty(env("GETANIME_RSS")) {
        resolved.feed_url = Some(url);
    }
    if let Some(dir) = non_empty(env("GETANIME_SAVE_DIR")) {
        resolved.save_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty(env("GETANIME_SORT_DIR")) {
        resolved.sort_dir = PathBuf::from(dir);
    }
    if let Some(secs) = non_empty(env("GETANIME_TIMEOUT_SECS")) {
        let secs = secs
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid GETANIME_TIMEOUT_SECS: {}", secs))?;
        resolved.timeout_seconds = Some(secs);
    }

    Ok(resolved)
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let file = match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };

    resolve(file, |key| std::env::var(key).ok())
}
