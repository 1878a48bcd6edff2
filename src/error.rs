//! Custom error types for envguard
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Parsing never fails; every other operation surfaces one of these kinds to
//! its caller.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for envguard operations
#[derive(Error, Debug)]
pub enum EnvError {
    /// A document, key, or ciphertext file is missing when it is required
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Authentication failed, or the key/ciphertext could not be decoded
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Sealing failed; not recoverable by the user
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// One or more required keys are absent
    #[error("Missing required env keys: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl EnvError {
    /// Create a "not found" error for a path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a decryption error
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption(_))
    }

    /// The ordered list of missing keys, for validation errors
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            Self::Validation { missing } => Some(missing),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EnvError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envguard operations
pub type EnvResult<T> = Result<T, EnvError>;
