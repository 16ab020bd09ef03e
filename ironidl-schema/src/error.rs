//! Error types for schema loading and validation.

use thiserror::Error;

/// Error type for schema loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid unit structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },
}

/// Error type for schema validation and registry construction.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A class name was registered twice.
    #[error("duplicate class '{name}' declared in '{first}' and '{second}'")]
    DuplicateClass {
        /// Class name.
        name: String,
        /// Unit of the first declaration.
        first: String,
        /// Unit of the second declaration.
        second: String,
    },

    /// Inheritance chain loops back on itself.
    #[error("circular inheritance detected: {path}")]
    CircularReference {
        /// Path of the cycle.
        path: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
