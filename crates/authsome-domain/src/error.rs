//! Error handling types
//!
//! Authentication *failures* are not errors: a rejected login is an ordinary
//! `Ok(None)`. The variants here are misconfigurations, caller mistakes and
//! collaborator failures.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Authsome
#[derive(Error, Debug)]
pub enum Error {
    /// A required collaborator capability is missing
    #[error("{backend}::{operation}() is not implemented")]
    NotImplemented {
        /// Name of the backend lacking the capability
        backend: String,
        /// The missing operation
        operation: String,
    },

    /// Configuration-related error, including "no identity could be established"
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation invoked in a state that does not allow it
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Session or cookie store failure
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Encryption, decryption or hashing failure
    #[error("Crypto error: {message}")]
    Crypto {
        /// Description of the crypto error
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a not-implemented error for a backend operation
    pub fn not_implemented<B: Into<String>, O: Into<String>>(backend: B, operation: O) -> Self {
        Self::NotImplemented {
            backend: backend.into(),
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with source
    pub fn storage_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a crypto error
    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Whether this error indicates a broken deployment rather than a
    /// transient or caller-side problem. Fatal errors should abort the
    /// request with a server error and are never retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotImplemented { .. } | Self::Configuration { .. })
    }
}
