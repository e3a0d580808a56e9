//! Error types for rowblocklib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or transposing tables
#[derive(Error, Debug)]
pub enum RowblockError {
    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input is valid JSON but not a table or document
    #[error("invalid input at {location}: {message}")]
    InvalidInput { location: String, message: String },

    /// Input is not valid JSON
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A data row does not match the header length under the strict policy
    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RowblockError {
    pub(crate) fn invalid(location: impl Into<String>, message: impl Into<String>) -> Self {
        RowblockError::InvalidInput {
            location: location.into(),
            message: message.into(),
        }
    }
}
