//! # Backend Error Types
//!
//! Errors raised while configuring or talking to the hosted backend services.

use thiserror::Error;

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error type for backend configuration and SDK calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// A configuration value is missing or malformed
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// SDK key of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// A service handle was requested before `initialize()` succeeded
    #[error("Backend has not been initialized")]
    NotInitialized,

    /// The underlying SDK rejected an operation
    #[error("{operation} failed: {message}")]
    Sdk {
        /// SDK call that failed
        operation: String,
        /// Error code or message reported by the SDK
        message: String,
    },

    /// A document path does not address a document
    #[error("Invalid document path: {path}")]
    InvalidDocumentPath {
        /// The rejected path
        path: String,
    },
}

impl BackendError {
    /// Create a new invalid configuration error
    #[must_use]
    pub fn invalid_config<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new SDK failure error
    #[must_use]
    pub fn sdk<O: Into<String>, M: Into<String>>(operation: O, message: M) -> Self {
        Self::Sdk {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid document path error
    #[must_use]
    pub fn invalid_path<T: Into<String>>(path: T) -> Self {
        Self::InvalidDocumentPath { path: path.into() }
    }

    /// Whether this error can only be fixed by changing the build configuration.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}
