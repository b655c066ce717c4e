//! Command-line interface for getanime.
//!
//! Provides commands for fetching torrents from a feed, sorting downloaded
//! episodes into series folders, and inspecting how filenames are parsed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;

use crate::adapters::HttpFetcher;
use crate::config::{self, ConfigError};
use crate::core::{fetch_and_save, sort_directory};
use crate::domain::PassReport;
use crate::media::{parse, ParsedMediaName, ReleaseNameParser};

/// getanime - Fetch torrents from an RSS feed and sort episodes by series
#[derive(Parser, Debug)]
#[command(name = "getanime")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every .torrent linked from an RSS feed
    Fetch {
        /// RSS URL for latest torrents
        #[arg(long)]
        rss: Option<String>,

        /// Path to save torrent files [default: ./]
        #[arg(long, alias = "save-dir")]
        savedir: Option<PathBuf>,

        /// Print the per-item report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move .mkv files into per-series subdirectories
    Sort {
        /// Directory with downloaded episodes [default: .]
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Print the per-file report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how filenames would be parsed and renamed
    Parse {
        /// Filenames to parse
        #[arg(required = true)]
        filenames: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Fetch { rss, savedir, json } => run_fetch(rss, savedir, json).await,
            Commands::Sort { dir, json } => run_sort(dir, json).await,
            Commands::Parse { filenames, json } => parse_filenames(&filenames, json),
            Commands::Config => show_config(),
        }
    }
}

/// Exit status when a required value is missing
pub const USAGE_EXIT_CODE: i32 = 1;

/// Error message followed by the `fetch` usage
fn usage_error(err: &ConfigError) -> String {
    let mut cmd = Cli::command();
    let usage = cmd
        .find_subcommand_mut("fetch")
        .map(|fetch| fetch.render_help().to_string())
        .unwrap_or_default();
    format!("{}\n\n{}", err, usage)
}

/// Fetch the feed and save its torrents
async fn run_fetch(rss: Option<String>, savedir: Option<PathBuf>, json: bool) -> Result<()> {
    let resolved = config::load_config()?;

    let fetch_config = match resolved.fetch_config(rss, savedir) {
        Ok(fetch_config) => fetch_config,
        Err(e) => {
            eprintln!("{}", usage_error(&e));
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    let fetcher = match fetch_config.timeout {
        Some(timeout) => HttpFetcher::with_timeout(timeout)?,
        None => HttpFetcher::new(),
    };

    let report = fetch_and_save(&fetch_config, &fetcher)
        .await
        .with_context(|| format!("Failed to fetch {}", fetch_config.feed_url))?;

    print_report(&report, json)
}

/// Sort a directory of downloaded episodes
async fn run_sort(dir: Option<PathBuf>, json: bool) -> Result<()> {
    let resolved = config::load_config()?;
    let sort_config = resolved.sort_config(dir);

    let report = sort_directory(&sort_config, &ReleaseNameParser)
        .await
        .with_context(|| format!("Failed to sort {}", sort_config.dir.display()))?;

    print_report(&report, json)
}

fn print_report(report: &PassReport, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        );
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// One line of `getanime parse --json` output
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed: Option<ParsedMediaName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> ParseOutput<'a> {
    fn new(filename: &'a str) -> Self {
        match parse(filename) {
            Ok(info) => Self {
                filename,
                normalized: Some(info.normalized()),
                parsed: Some(info),
                error: None,
            },
            Err(e) => Self {
                filename,
                parsed: None,
                normalized: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Parse filenames without touching the filesystem
fn parse_filenames(filenames: &[String], json: bool) -> Result<()> {
    let outputs: Vec<ParseOutput> = filenames.iter().map(|f| ParseOutput::new(f)).collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outputs).context("Failed to serialize parse results")?
        );
        return Ok(());
    }

    for output in &outputs {
        println!("{}", output.filename);
        match (&output.parsed, &output.normalized) {
            (Some(info), Some(normalized)) => {
                println!("  Title:      {}", info.series_title);
                println!("  Episode:    {}", info.episode_number);
                println!("  Group:      {}", info.release_group_or_site);
                println!("  Resolution: {}", info.resolution);
                println!("  Container:  {}", info.container_extension);
                println!("  Sorted as:  {}/{}", info.series_title, normalized);
            }
            _ => {
                println!("  Error: {}", output.error.as_deref().unwrap_or("unknown"));
            }
        }
        println!();
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::load_config()?;

    println!("getanime configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Fetch:");
    println!("  Feed URL:  {}", cfg.feed_url.as_deref().unwrap_or("(not set)"));
    println!("  Save dir:  {}", cfg.save_dir.display());
    println!(
        "  Timeout:   {}",
        cfg.timeout_seconds
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "(client default)".to_string())
    );
    println!();
    println!("Sort:");
    println!("  Directory: {}", cfg.sort_dir.display());

    Ok(())
}
