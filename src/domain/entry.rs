//! Directory listing entries considered by the sort pipeline.

/// Container suffix the sort pipeline picks up
pub const MEDIA_SUFFIX: &str = ".mkv";

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,

    /// False when `name` is a lossy rendering of a non UTF-8 file name
    pub utf8_name: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            name: name.into(),
            is_directory,
            utf8_name: true,
        }
    }

    /// Entry for a file name that is not valid UTF-8
    pub fn lossy(name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            utf8_name: false,
            ..Self::new(name, is_directory)
        }
    }

    /// Whether the entry is a visible `.mkv` file that should be sorted
    pub fn is_sort_candidate(&self) -> bool {
        !self.is_directory && !self.name.starts_with('.') && self.name.ends_with(MEDIA_SUFFIX)
    }
}
