//! Error types for the hygiene library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hygiene operations.
#[derive(Debug, Error)]
pub enum HygieneError {
    /// The input path does not resolve to a readable file.
    #[error("File not found: '{path}': {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but holds no header or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Malformed delimited content.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// A table breaks the table contract, or cannot be written faithfully.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected fault inside an inspection operation.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Error writing an output file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library while writing.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl HygieneError {
    /// Convert a CSV read error into a [`HygieneError::Parse`] carrying the line number.
    pub(crate) fn from_csv_read(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("expected {} fields, found {}", expected_len, len),
            csv::ErrorKind::Utf8 { err: utf8, .. } => format!("invalid UTF-8: {}", utf8),
            _ => err.to_string(),
        };
        HygieneError::Parse { line, message }
    }
}

/// Result type alias for hygiene operations.
pub type Result<T> = std::result::Result<T, HygieneError>;
