//! Error types for values crossing the native boundary.

use thiserror::Error;

/// Error raised by generated bindings when a call or conversion fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    /// A string returned by the native side is not valid UTF-8.
    #[error("invalid UTF-8 in native string at byte {valid_up_to}")]
    InvalidUtf8 {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
    },

    /// A string passed to the native side contains a NUL byte.
    #[error("string contains an interior NUL byte at position {position}")]
    InteriorNul {
        /// Byte position of the first NUL.
        position: usize,
    },

    /// A pointer that must be non-null was null.
    #[error("null {what} pointer received from native side")]
    NullPointer {
        /// Which pointer was null.
        what: &'static str,
    },

    /// The native object behind a handle has already been disposed.
    #[error("native object has been disposed")]
    Disposed,

    /// The native side reported an exception.
    #[error("native exception: {message}")]
    Exception {
        /// Stringified exception.
        message: String,
    },
}

impl BoundaryError {
    /// Creates a null pointer error.
    #[must_use]
    pub const fn null(what: &'static str) -> Self {
        Self::NullPointer { what }
    }

    /// Creates an exception error with the given message.
    pub fn exception(message: impl Into<String>) -> Self {
        Self::Exception {
            message: message.into(),
        }
    }
}

/// Result type alias for boundary operations.
pub type Result<T> = std::result::Result<T, BoundaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoundaryError::InvalidUtf8 { valid_up_to: 3 };
        assert_eq!(err.to_string(), "invalid UTF-8 in native string at byte 3");

        let err = BoundaryError::null("method table");
        assert!(err.to_string().contains("method table"));

        let err = BoundaryError::exception("TypeError: boom");
        assert_eq!(err.to_string(), "native exception: TypeError: boom");
    }
}
