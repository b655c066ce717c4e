//! Filename parser for fansub and scene style release names.
//!
//! Parses filenames like:
//! - "[GroupX] My Show - 05 [720p].mkv"
//! - "[SubsPlease] Sousou no Frieren - 12 (1080p) [ABCD1234].mkv"
//! - "My.Show.S01E05.720p.WEB-GRP.mkv"
//! - "Show_Name_-_07_[720p].mkv"
//!
//! # Grammar
//!
//! 1. A trailing `.ext` is the container when `ext` is a known video container.
//! 2. A leading bracket tag (`[..]`, `(..)`, `【..】`) is the group or site.
//! 3. Remaining bracket tags are classified: a resolution fills `resolution`,
//!    a bare 1-3 digit number is a fallback episode, anything else (CRC
//!    hashes, codec notes) is dropped.
//! 4. Unbracketed text with no spaces uses `.` and `_` as word delimiters.
//! 5. Episode rules, first match wins: `S01E05`/`1x05`, ` - 05`,
//!    `E05`/`Ep 05`/`Episode 05`, then a trailing bare number before any
//!    technical token. `v2` suffixes are ignored.
//! 6. The title is everything before the episode. Without an episode it
//!    ends at the first technical token (`1080p`, `WEB-DL`, `x264`, ...).
//! 7. Without a leading tag, a scene-style `-GROUP` suffix after the title
//!    is the group.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::name::ParsedMediaName;

/// Suffixes treated as the container extension
const CONTAINERS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "webm", "ts", "mov", "wmv", "flv", "ogm",
];

/// `-XYZ` suffixes that belong to a technical token, not a group
const NOT_GROUPS: &[&str] = &["dl", "rip", "ray", "bit", "sub", "subs"];

static LEADING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[\[(【]\s*([^\])】]*?)\s*[\])】]").unwrap());

static BRACKET_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[(【]([^\[\]()【】]*)[\])】]").unwrap());

static RESOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:\d{3,4}[pi]|\d{3,4}x\d{3,4}|4k)\b").unwrap());

static BRACKET_EPISODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,3})(?:v\d+)?$").unwrap());

static SEASON_EPISODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:s\d{1,2}\s?e|\d{1,2}x)(\d{1,4})(?:v\d+)?\b").unwrap()
});

static DASH_EPISODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s-\s*(\d{1,4})(?:v\d+)?(?:\s|$)").unwrap());

static MARKED_EPISODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:episode|ep|e)\.?\s?(\d{1,4})(?:v\d+)?\b").unwrap()
});

static TRAILING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)#?(\d{1,3})(?:v\d+)?\s*$").unwrap());

static TECH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{3,4}[pi]|\d{3,4}x\d{3,4}|4k|web(?:-?dl|-?rip)?|blu-?ray|bdrip|brrip|bd|hdtv|dvdrip|x\s?26[45]|h\s?26[45]|hevc|avc|aac|flac|opus|10-?bit|8-?bit|hi10p?|proper|repack)\b",
    )
    .unwrap()
});

static SCENE_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([A-Za-z0-9]+)\s*$").unwrap());

/// Characters that may not appear in a directory or file name
static ILLEGAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\p{Cc}]"#).unwrap());

static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Errors parsing a release filename
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Filename is empty")]
    Empty,

    #[error("No series title found in {0:?}")]
    MissingTitle(String),
}

/// Strategy for turning a raw filename into [`ParsedMediaName`]
pub trait FilenameParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<ParsedMediaName, ParseError>;
}

/// Default parser implementing the grammar in the module docs
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseNameParser;

impl ReleaseNameParser {
    pub fn new() -> Self {
        Self
    }
}

impl FilenameParser for ReleaseNameParser {
    fn parse(&self, raw: &str) -> Result<ParsedMediaName, ParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        let (stem, container_extension) = split_container(raw);

        let (leading_group, rest) = match LEADING_TAG_RE.captures(stem) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                (caps[1].to_string(), &stem[end..])
            }
            None => (String::new(), stem),
        };

        let mut resolution = String::new();
        let mut bracket_episode: Option<u32> = None;
        for caps in BRACKET_TAG_RE.captures_iter(rest) {
            let inner = caps[1].trim();
            if resolution.is_empty() {
                if let Some(m) = RESOLUTION_RE.find(inner) {
                    resolution = m.as_str().to_string();
                    continue;
                }
            }
            if bracket_episode.is_none() {
                bracket_episode = BRACKET_EPISODE_RE
                    .captures(inner)
                    .and_then(|c| c[1].parse().ok());
            }
        }

        let text = split_words(&BRACKET_TAG_RE.replace_all(rest, " "));

        if resolution.is_empty() {
            if let Some(m) = RESOLUTION_RE.find(&text) {
                resolution = m.as_str().to_string();
            }
        }

        let tech_start = TECH_RE.find(&text).map(|m| m.start());
        let episode = find_episode(&text).or_else(|| {
            let head = &text[..tech_start.unwrap_or(text.len())];
            capture_number(&TRAILING_NUMBER_RE, head)
        });

        let title_end = match episode {
            Some((start, _)) => start,
            None => tech_start.unwrap_or(text.len()),
        };

        let series_title = clean_component(&text[..title_end]);
        if series_title.is_empty() {
            return Err(ParseError::MissingTitle(raw.to_string()));
        }

        let release_group = if leading_group.trim().is_empty() {
            scene_group(&text, title_end).unwrap_or_default()
        } else {
            leading_group
        };

        let parsed = ParsedMediaName {
            series_title,
            episode_number: episode.map(|(_, n)| n).or(bracket_episode).unwrap_or(0),
            release_group_or_site: clean_component(&release_group),
            resolution: clean_component(&resolution),
            container_extension,
        };

        debug!(
            filename = raw,
            title = %parsed.series_title,
            episode = parsed.episode_number,
            group = %parsed.release_group_or_site,
            resolution = %parsed.resolution,
            "Parsed filename"
        );

        Ok(parsed)
    }
}

/// Parse with the default [`ReleaseNameParser`]
pub fn parse(raw: &str) -> Result<ParsedMediaName, ParseError> {
    ReleaseNameParser.parse(raw)
}

/// Split off a known container suffix, returning the stem and lowercase extension
fn split_container(raw: &str) -> (&str, String) {
    if let Some((stem, ext)) = raw.rsplit_once('.') {
        let ext = ext.to_ascii_lowercase();
        if !stem.is_empty() && CONTAINERS.contains(&ext.as_str()) {
            return (stem, ext);
        }
    }
    (raw, String::new())
}

/// Turn `.`/`_` delimited names into space separated words
fn split_words(s: &str) -> String {
    let trimmed = s.trim();
    let spaced = if trimmed.contains(' ') {
        trimmed.replace('_', " ")
    } else {
        trimmed.replace(['.', '_'], " ")
    };
    MULTI_SPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

fn find_episode(text: &str) -> Option<(usize, u32)> {
    [&*SEASON_EPISODE_RE, &*DASH_EPISODE_RE, &*MARKED_EPISODE_RE]
        .into_iter()
        .find_map(|re| capture_number(re, text))
}

/// Start of the whole match and the number in group 1
fn capture_number(re: &Regex, text: &str) -> Option<(usize, u32)> {
    let caps = re.captures(text)?;
    let start = caps.get(0)?.start();
    Some((start, caps[1].parse().unwrap_or(0)))
}

fn scene_group(text: &str, title_end: usize) -> Option<String> {
    let caps = SCENE_GROUP_RE.captures(text)?;
    if caps.get(0)?.start() < title_end {
        return None;
    }
    let group = &caps[1];
    if NOT_GROUPS.contains(&group.to_ascii_lowercase().as_str()) {
        return None;
    }
    Some(group.to_string())
}

/// Drop illegal characters, collapse whitespace and trim separators
fn clean_component(s: &str) -> String {
    let legal = ILLEGAL_CHARS_RE.replace_all(s, " ");
    let collapsed = MULTI_SPACE_RE.replace_all(&legal, " ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '.' | '~' | ','))
        .to_string()
}
