//! Media filename parsing and canonical naming.
//!
//! Downloaded episodes arrive with release-group specific names. This
//! module extracts the series metadata from those names and renders a
//! canonical, episode-first filename:
//!
//! ```text
//! [GroupX] My Show - 05 [720p].mkv  →  My Show/05 - My Show [GroupX] [720p].mkv
//! ```

pub mod name;
pub mod parser;

pub use name::{normalize, ParsedMediaName};
pub use parser::{parse, FilenameParser, ParseError, ReleaseNameParser};
