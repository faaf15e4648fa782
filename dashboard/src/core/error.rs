//! # Client Error Types
//!
//! Consolidated error handling for the dashboard client.
//!
//! ## Error Categories
//!
//! - **Validation**: local input check failed; nothing was sent
//! - **Remote**: the backend (or the network) refused the request
//! - **Unauthorized**: the backend rejected the bearer token
//! - **Storage**: the session store could not be read or written
//! - **Busy**: a request from the same flow is still in flight
//! - **InvalidTransition**: the operation does not apply to the current step
//!
//! Flows surface every error as a message and leave their state unchanged.
//! Only [`ClientError::Unauthorized`] has a side effect, applied by the session
//! guard in [`crate::app::session`].
//!
//! ```rust
//! use dashboard::core::error::ClientError;
//!
//! let err = ClientError::validation("code", "Code must be 4 digits");
//! assert_eq!(err.to_string(), "Code must be 4 digits");
//! assert_eq!(err.field(), Some("code"));
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Local validation failure for one input field.
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    /// Backend or network failure; the message is safe to show.
    #[error("{0}")]
    Remote(String),

    /// The bearer token is missing, expired or unknown to the backend.
    #[error("Session expired, please sign in again")]
    Unauthorized,

    /// Session store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Another request of the same flow has not settled yet.
    #[error("Please wait for the current request to finish")]
    Busy,

    /// The operation is not valid in the current step.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ClientError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Field a validation error belongs to.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ClientError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

/// Adapter for the `Result<_, String>` validators in `lib_utils`.
pub(crate) fn check<T>(field: &'static str, result: std::result::Result<T, String>) -> Result<T> {
    result.map_err(|message| ClientError::validation(field, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tags_field() {
        let err = check("phone", lib_utils::validation::validate_phone("123")).unwrap_err();
        assert_eq!(err.field(), Some("phone"));
        assert_eq!(err.to_string(), "Phone number must contain 11 digits");

        assert_eq!(
            check("phone", lib_utils::validation::validate_phone("79991234567")).unwrap(),
            "79991234567"
        );
    }

    #[test]
    fn test_io_error_is_storage() {
        let err: ClientError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, ClientError::Storage(_)));
        assert!(!err.is_unauthorized());
    }
}
