//! Error types for the `itr` binary.
//!
//! Library failures pass through as [`AppError::Tracker`]; the rest are
//! CLI-level concerns (configuration, output encoding, dataset checks).

use thiserror::Error;
use tracker_lib::TrackerError;

/// Primary error type for CLI operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error raised by the snapshot or query engine.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Configuration file or override could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command argument failed validation.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// `check` found at least one error-level problem.
    #[error("Dataset check failed: {errors} error(s)")]
    CheckFailed { errors: usize },

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (config file) error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
