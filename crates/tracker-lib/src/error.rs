//! Error types for `tracker-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for tracker-lib operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Lookup Errors ===
    /// No issue matched the requested ID (or the ID was empty).
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Input Errors ===
    /// A caller-supplied argument was empty or malformed.
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A date string did not match the expected format.
    #[error("Invalid date '{value}': expected {format}")]
    InvalidDate { value: String, format: &'static str },

    // === Record Errors ===
    /// A CSV line could not be turned into a record.
    #[error("Record parse error at line {line}: {reason}")]
    RecordParse { line: usize, reason: String },

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// Data file not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TrackerError {
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn record_parse(line: usize, reason: impl Into<String>) -> Self {
        Self::RecordParse {
            line,
            reason: reason.into(),
        }
    }

    /// True for errors that mean "no such issue" rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::IssueNotFound { .. })
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;
