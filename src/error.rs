//! Error types for the bibshelf crate
//!
//! Malformed citation or metadata *content* never produces one of these: the
//! parsers skip what they cannot recognize. Errors are reserved for I/O,
//! configuration, serialization and caller-supplied parameters.

use std::fmt;
use thiserror::Error;

/// Result type for bibshelf operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibshelf
#[derive(Error, Debug)]
pub enum Error {
    /// Site identifier outside `[a-zA-Z0-9_.]+`
    #[error("Invalid site identifier '{0}'")]
    InvalidSiteId(String),

    /// Configuration file could not be decoded
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON serialization failure
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Location of something the record parser skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Location {
    /// Compute the location of a byte offset within `input`
    #[must_use]
    pub fn of_offset(input: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for (i, ch) in input.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
