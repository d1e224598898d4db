//! Error types for exmetricslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading Elixir sources
#[derive(Error, Debug)]
pub enum ExmetricsError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("file '{path}' is not valid UTF-8")]
    Encoding { path: PathBuf },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
