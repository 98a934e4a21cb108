//! Error handling for exposure grouping operations.
//!
//! Provides error types with context for file discovery, FITS header
//! parsing, and metadata validation failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrouperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input directory not found: {path}")]
    InputDirNotFound { path: PathBuf },

    #[error("invalid FITS format in file: {path} - {reason}")]
    InvalidFits { path: PathBuf, reason: String },

    #[error("malformed metadata: missing required keyword '{keyword}'")]
    MissingKeyword { keyword: String },

    #[error("malformed metadata: keyword '{keyword}' is not {expected}")]
    KeywordType {
        keyword: String,
        expected: &'static str,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("directory traversal error: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GrouperError {
    /// Create a missing keyword error
    pub fn missing_keyword(keyword: impl Into<String>) -> Self {
        Self::MissingKeyword {
            keyword: keyword.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid FITS format error
    pub fn invalid_fits(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFits {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrouperError>;
