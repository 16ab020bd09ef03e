//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] ironidl_schema::ParseError),

    /// Schema validation or registry error.
    #[error("schema error: {0}")]
    Schema(#[from] ironidl_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template asset missing or malformed. Always fatal.
    #[error("template '{name}': {message}")]
    Template {
        /// Template name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Diagnostics were reported while strict mode is on.
    #[error("{count} diagnostic(s) reported for unit '{unit}' in strict mode")]
    Strict {
        /// Unit filename.
        unit: String,
        /// Number of diagnostics.
        count: usize,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a template error.
    pub fn template(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            name: name.into(),
            message: message.into(),
        }
    }
}
