//! Error types for Solidafy Harvest
//!
//! This module defines the error hierarchy for the whole connector.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Solidafy Harvest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Query Errors
    // ============================================================================
    #[error("Invalid Structure: '{structure}' is not a valid structure")]
    InvalidStructure { structure: String },

    #[error("Unresolved template parameter(s): {names}")]
    UnresolvedParameter { names: String },

    #[error("Duplicate query parameter '{name}'")]
    DuplicateParameter { name: String },

    #[error("Missing required parameter(s) for '{structure}': {}", .names.join(", "))]
    MissingRequiredParameter {
        structure: String,
        names: Vec<String>,
    },

    #[error("Invalid value '{value}' for path parameter '{name}'")]
    InvalidPathParameter { name: String, value: String },

    #[error("Operation '{operation}' is not supported for structure '{structure}'")]
    UnsupportedOperation {
        structure: String,
        operation: String,
    },

    #[error("Sort order is not supported by the Harvest connector")]
    SortUnsupported,

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("404 Page not found at {url}")]
    ResourceNotFound { url: String },

    #[error("401 Authentication failed: {body}")]
    Authentication { body: String },

    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Unable to make a connection to Harvest: {message}")]
    Transport { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid structure error
    pub fn invalid_structure(structure: impl Into<String>) -> Self {
        Self::InvalidStructure {
            structure: structure.into(),
        }
    }

    /// Create an unresolved parameter error
    pub fn unresolved(names: impl Into<String>) -> Self {
        Self::UnresolvedParameter {
            names: names.into(),
        }
    }

    /// Create a duplicate parameter error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateParameter { name: name.into() }
    }

    /// Create a missing required parameter error
    pub fn missing_params(structure: impl Into<String>, names: Vec<String>) -> Self {
        Self::MissingRequiredParameter {
            structure: structure.into(),
            names,
        }
    }

    /// Create an invalid path parameter error
    pub fn invalid_path_param(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidPathParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(structure: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            structure: structure.into(),
            operation: operation.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status to the matching error
    pub fn from_status(status: u16, url: &str, body: impl Into<String>) -> Self {
        match status {
            401 => Self::Authentication { body: body.into() },
            404 => Self::ResourceNotFound {
                url: url.to_string(),
            },
            _ => Self::Remote {
                status,
                body: body.into(),
            },
        }
    }

    /// Check if this error was caused by the caller's request rather than the remote side
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidStructure { .. }
                | Error::UnresolvedParameter { .. }
                | Error::DuplicateParameter { .. }
                | Error::MissingRequiredParameter { .. }
                | Error::InvalidPathParameter { .. }
                | Error::UnsupportedOperation { .. }
                | Error::SortUnsupported
        )
    }
}

/// Result type alias for Solidafy Harvest
pub type Result<T> = std::result::Result<T, Error>;
