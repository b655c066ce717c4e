//! Parsed release metadata and canonical file naming.

use serde::{Deserialize, Serialize};

/// Metadata extracted from a raw media filename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMediaName {
    /// Show name, also used as the series directory name
    pub series_title: String,

    /// Episode number (0 when the name carries none)
    pub episode_number: u32,

    /// Fansub group or site tag, may be empty
    pub release_group_or_site: String,

    /// e.g. "720p", may be empty
    pub resolution: String,

    /// Lowercase container suffix without the dot, e.g. "mkv"
    pub container_extension: String,
}

impl ParsedMediaName {
    /// Canonical filename, see [`normalize`]
    pub fn normalized(&self) -> String {
        normalize(self)
    }
}

/// Render metadata as `"NN - Title [Group] [Resolution].ext"`.
///
/// The episode comes first and is padded to two digits so a plain
/// lexicographic listing orders episodes numerically, whichever group
/// released them.
pub fn normalize(info: &ParsedMediaName) -> String {
    format!(
        "{:02} - {} [{}] [{}].{}",
        info.episode_number,
        info.series_title,
        info.release_group_or_site,
        info.resolution,
        info.container_extension
    )
}
