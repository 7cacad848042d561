// Central Error Type for the Application

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// A required durable resource (dictionary or ledger) could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A ledger append did not reach the device.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Device error: {0}")]
    Device(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
