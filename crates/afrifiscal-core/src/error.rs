//! Error types for the African fiscal dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the dashboard
#[derive(Debug)]
pub enum Error {
    /// The analytics API could not be reached
    Network {
        /// Endpoint that was called
        endpoint: String,
        /// Transport error message
        message: String,
    },

    /// The analytics API answered with a non-success status
    Status {
        /// Endpoint that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body did not match the endpoint schema
    Decode {
        /// Endpoint that was called
        endpoint: String,
        /// Parser error message
        message: String,
    },

    /// A valid response with nothing to display
    EmptyResult {
        /// Resource that came back empty
        resource: String,
    },

    /// Timeout error
    Timeout {
        /// Timeout duration in milliseconds
        duration_ms: u64,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Template rendering error
    Render {
        /// Error message
        message: String,
    },

    /// I/O error
    Io(std::io::Error),

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error
    #[must_use]
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an empty-result error
    #[must_use]
    pub fn empty<S: Into<String>>(resource: S) -> Self {
        Self::EmptyResult {
            resource: resource.into(),
        }
    }

    /// Whether the error came from talking to the remote analytics API
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Status { .. } | Self::Decode { .. } | Self::Timeout { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { endpoint, message } => {
                write!(f, "Network error calling {endpoint}: {message}")
            }
            Self::Status { endpoint, status } => {
                write!(f, "API returned status {status} for {endpoint}")
            }
            Self::Decode { endpoint, message } => {
                write!(f, "Unexpected response from {endpoint}: {message}")
            }
            Self::EmptyResult { resource } => write!(f, "No data available: {resource}"),
            Self::Timeout { duration_ms } => {
                write!(f, "Operation timed out after {duration_ms}ms")
            }
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Render { message } => write!(f, "Render error: {message}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
