//! Error types for the Scour library.
//!
//! Only whole-run failures live here: unreadable or structurally broken
//! input, and out-of-range configuration. Per-record problems are never
//! errors; they become [`Issue`](crate::record::Issue) flags on the record.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Scour operations.
#[derive(Debug, Error)]
pub enum ScourError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the input header.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// Empty file or no data to clean.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error (rejected at startup, before any cleaning runs).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
