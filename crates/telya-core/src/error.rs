//! Error types for the Telya core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types shared by the site and the relay.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A dotted content path that does not name an editable field.
    #[error("Unknown content field: {0}")]
    UnknownField(String),

    /// Browser storage access failed (quota, privacy mode, missing window).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network failure before any HTTP status was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new unknown field error.
    pub fn unknown_field(path: impl Into<String>) -> Self {
        Self::UnknownField(path.into())
    }

    /// Create a new storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a new transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_error() {
        let err = CoreError::unknown_field("hero.banner");
        assert!(err.to_string().contains("Unknown content field"));
        assert!(err.to_string().contains("hero.banner"));
    }

    #[test]
    fn test_transport_error() {
        let err = CoreError::transport("connection reset");
        assert!(err.to_string().contains("Transport error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
