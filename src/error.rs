//! Error types and handling for the `Hazardwatch` engine

use thiserror::Error;

/// Main error type for the `Hazardwatch` engine
#[derive(Error, Debug)]
pub enum HazardwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Report backend unreachable or returned a non-success status
    #[error("Network error: {message}")]
    Network { message: String },

    /// The report payload could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A platform capability required to start tracking was not granted
    #[error("Permission denied: {capability}")]
    PermissionDenied { capability: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl HazardwatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new permission error naming the missing capability
    pub fn permission_denied<S: Into<String>>(capability: S) -> Self {
        Self::PermissionDenied {
            capability: capability.into(),
        }
    }

    /// Whether tracking can continue after this error.
    ///
    /// Fetch and parse failures are recovered locally — one bad fetch must
    /// not interrupt tracking. Permission failures are fatal to the session.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HazardwatchError::Network { .. } | HazardwatchError::Parse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HazardwatchError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            HazardwatchError::Network { .. } => {
                "Unable to reach the report service. Please check your internet connection."
                    .to_string()
            }
            HazardwatchError::Parse { .. } => {
                "The report service returned an unexpected response.".to_string()
            }
            HazardwatchError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            HazardwatchError::PermissionDenied { capability } => {
                format!("Please grant {capability} permission in settings to enable alerts.")
            }
            HazardwatchError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
