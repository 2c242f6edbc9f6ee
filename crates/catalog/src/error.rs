//! Error types for the catalog crate.
//!
//! These cover building a [`MoodTable`](crate::MoodTable), either from the
//! built-in mapping or from a mood table file on disk.

use thiserror::Error;

/// Errors that can occur while building or loading a mood table
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a mood table file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a mood table file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The same mood appears twice (keys compare case-insensitively)
    #[error("Duplicate mood: {mood}")]
    DuplicateMood { mood: String },

    /// A mapping had an empty mood or genre
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
