//! Error types and error handling for wibl.
//!
//! This module defines the error types used throughout the
//! crate. Indexing failures are additionally reported through the
//! worker's finished event; search failures are returned directly.

use thiserror::Error;

/// Result type alias for wibl operations
pub type Result<T> = std::result::Result<T, WiblError>;

/// Main error type for wibl
#[derive(Error, Debug)]
pub enum WiblError {
    #[error("Invalid volume info.")]
    InvalidVolume,

    #[error("Cannot open output index file for writing: {0}")]
    CannotOpenOutput(String),

    #[error("Failed writing index file: {0}")]
    IndexWriteFailed(String),

    #[error("Canceled.")]
    Canceled,

    #[error("Cannot open index file: {0}")]
    CannotOpenIndex(String),

    #[error("Invalid index file: {0}")]
    InvalidIndex(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("An indexing job is already running")]
    JobInFlight,

    #[error("Indexing worker is not running")]
    WorkerUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl WiblError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, WiblError::CannotOpenIndex(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            WiblError::InvalidVolume
                | WiblError::InvalidQuery(_)
                | WiblError::ConfigError(_)
                | WiblError::JobInFlight
        )
    }

    /// Check if the operation stopped because cancellation was observed
    pub fn is_canceled(&self) -> bool {
        matches!(self, WiblError::Canceled)
    }
}
