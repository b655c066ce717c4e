//! Per-item results of a pipeline pass.
//!
//! Pipelines never abort on a single bad item. Instead every item gets an
//! [`ItemReport`] and the caller decides how to present them.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Why an item was left untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum SkipReason {
    /// Destination already present (idempotent re-run)
    AlreadyExists(PathBuf),

    /// Filename could not be parsed into a series title
    Unparsable(String),

    /// Item has no usable name for its destination
    EmptyName,

    /// File name is not valid UTF-8 and cannot be parsed
    NonUtf8Name,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyExists(path) => write!(f, "{} already exists", path.display()),
            SkipReason::Unparsable(msg) => write!(f, "unparsable name: {}", msg),
            SkipReason::EmptyName => write!(f, "empty name"),
            SkipReason::NonUtf8Name => write!(f, "name is not valid UTF-8"),
        }
    }
}

/// Outcome for a single feed item or file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    /// Saved or moved to `destination`
    Completed { destination: PathBuf },

    /// Left alone on purpose
    Skipped { reason: SkipReason },

    /// An I/O or network error for this item only
    Failed { reason: String },
}

/// Result for one item, tagged with its position in the pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    /// Position in the feed or in the filtered listing
    pub index: usize,

    /// Feed item title or source filename
    pub name: String,

    pub outcome: Outcome,
}

impl ItemReport {
    pub fn completed(index: usize, name: impl Into<String>, destination: PathBuf) -> Self {
        Self {
            index,
            name: name.into(),
            outcome: Outcome::Completed { destination },
        }
    }

    pub fn skipped(index: usize, name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            index,
            name: name.into(),
            outcome: Outcome::Skipped { reason },
        }
    }

    pub fn failed(index: usize, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            outcome: Outcome::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// All item results of one pipeline pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub items: Vec<ItemReport>,

    /// True when a download failure stopped the pass early
    pub halted: bool,
}

impl PassReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ItemReport) {
        self.items.push(item);
    }

    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Completed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// Destinations of every completed item, in pass order
    pub fn destinations(&self) -> Vec<&PathBuf> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                Outcome::Completed { destination } => Some(destination),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} completed, {} skipped, {} failed",
            self.completed(),
            self.skipped(),
            self.failed()
        )?;
        if self.halted {
            write!(f, " (halted early)")?;
        }
        Ok(())
    }
}
