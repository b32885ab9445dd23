//! Error types for montage

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for montage operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Viewer error types
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source file could not be opened or read
    #[error("Can't open file {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line exceeds the configured maximum length (reject policy)
    #[error("Line {line} is {length} characters long (limit is {max})")]
    LineTooLong { line: usize, length: usize, max: usize },

    /// The file has more lines than the configured maximum (reject policy)
    #[error("File has {count} lines (limit is {max})")]
    TooManyLines { count: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),
}
