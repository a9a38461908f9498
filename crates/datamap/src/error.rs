//! Error types for datamap.
//!
//! This module defines all error types used throughout the datamap crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for datamap operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Catalog Errors ===
    /// Failed to read the catalog file.
    #[error("failed to read catalog at {path}: {source}")]
    CatalogRead {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a valid list of system records.
    #[error("failed to parse catalog at {path}: {source}")]
    CatalogParse {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A strict catalog check found problems.
    #[error("catalog has {count} issue(s)")]
    CatalogIssues {
        /// Number of issues found.
        count: usize,
    },

    /// No system with the given fides key exists in the catalog.
    #[error("no system with fides key '{fides_key}' in the catalog")]
    SystemNotFound {
        /// The key that was looked up.
        fides_key: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A configuration file given explicitly does not exist.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// The missing file.
        path: PathBuf,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for datamap operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a system-not-found error for the given key.
    #[must_use]
    pub fn system_not_found(fides_key: impl Into<String>) -> Self {
        Self::SystemNotFound {
            fides_key: fides_key.into(),
        }
    }

    /// Check if this error means a lookup key was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SystemNotFound { .. })
    }

    /// Check if this error came from loading or checking the catalog.
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            Self::CatalogRead { .. } | Self::CatalogParse { .. } | Self::CatalogIssues { .. }
        )
    }

    /// Check if this error came from loading or validating configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } | Self::ConfigNotFound { .. }
        )
    }

    /// Process exit status for this error: 2 for configuration problems,
    /// 3 for catalog problems, 4 for an unknown system, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.is_config_error() {
            2
        } else if self.is_catalog_error() {
            3
        } else if self.is_not_found() {
            4
        } else {
            1
        }
    }
}
