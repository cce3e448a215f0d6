//! Error handling
//!
//! Typed errors for head synchronization, sitemap generation and file
//! access, with recovery suggestions for the CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in couture operations
#[derive(Error, Debug)]
pub enum SeoError {
    /// The document has no head to synchronize
    #[error("Document head unavailable: {details}")]
    EnvironmentUnavailable { details: String },

    /// Sitemap entry cannot be rendered
    #[error("Invalid sitemap entry '{path}': {details}")]
    InvalidSitemap { path: String, details: String },

    /// Unknown sitemap change frequency
    #[error("Unknown change frequency '{0}'. Expected one of: always, hourly, daily, weekly, monthly, yearly, never")]
    InvalidChangeFrequency(String),

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File not found (when expected to exist)
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },
}

impl SeoError {
    /// Create an error from a failed read, classified by its kind
    pub fn from_read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => SeoError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => SeoError::NotFound { path },
            _ => SeoError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// Create an error from a failed write, classified by its kind
    pub fn from_write(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => SeoError::PermissionDenied {
                path,
                source: error,
            },
            _ => SeoError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            SeoError::EnvironmentUnavailable { .. } => {
                Some("Make sure the file is a full HTML document with a <head> element.")
            }
            SeoError::PermissionDenied { .. } => {
                Some("Check file and directory permissions.")
            }
            SeoError::InvalidSitemap { .. } | SeoError::InvalidChangeFrequency(_) => {
                Some("Fix the [[sitemap.paths]] entries in your config file.")
            }
            _ => None,
        }
    }
}

/// Result type for couture operations
pub type SeoResult<T> = Result<T, SeoError>;
