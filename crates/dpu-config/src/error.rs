//! Error types for DPU configuration handling.
//!
//! Errors fall into two groups. Serialization failures describe a single
//! object or blob that could not be converted; the fragment layer turns them
//! into absent values. Configuration errors come out of the plugin contract
//! and must reach the operator.

use thiserror::Error;

/// Main error type for the configuration core.
#[derive(Debug, Error)]
pub enum ConfigError {
    // Serialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Type tag mismatch: expected {expected}, found {found}")]
    TagMismatch { expected: String, found: String },

    #[error("Invalid master container: {message}")]
    Container {
        message: String,
        #[source]
        source: Option<Box<ConfigError>>,
    },

    #[error("Invalid alias: {alias:?}")]
    InvalidAlias { alias: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialization {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ConfigError {
    /// Create a configuration error from any displayable cause.
    pub fn configuration(message: impl Into<String>) -> Self {
        ConfigError::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error means a single object or blob could not be converted.
    ///
    /// These are the failures the fragment layer downgrades to "absent".
    pub fn is_serialization_failure(&self) -> bool {
        matches!(
            self,
            ConfigError::Serialization { .. }
                | ConfigError::TagMismatch { .. }
                | ConfigError::Container { .. }
        )
    }

    /// Check if this error is allowed to propagate to the plugin framework.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ConfigError::Configuration { .. } | ConfigError::Validation { .. }
        )
    }
}
