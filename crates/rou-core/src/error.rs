//! Error types for rou.
//!
//! [`RouError`] is what handlers return. The dispatcher turns an error into a
//! JSON error envelope when the handler has not written a response yet, using
//! [`RouError::status_code`] and [`RouError::client_message`].

use http::StatusCode;
use thiserror::Error;

use crate::envelope::{MSG_INTERNAL, MSG_INVALID_BODY};

/// Result type alias using [`RouError`].
pub type RouResult<T> = Result<T, RouError>;

/// Standard error type for handlers and the JSON helpers.
///
/// # Example
///
/// ```
/// use rou_core::{RouError, RouResult};
/// use http::StatusCode;
///
/// fn find_user(id: &str) -> RouResult<String> {
///     if id.is_empty() {
///         return Err(RouError::status(StatusCode::NOT_FOUND, "User not found"));
///     }
///     Ok(format!("user-{id}"))
/// }
///
/// let err = find_user("").unwrap_err();
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert_eq!(err.client_message(), "User not found");
/// ```
#[derive(Error, Debug)]
pub enum RouError {
    /// The request body could not be decoded.
    #[error("Invalid request body: {source}")]
    InvalidBody {
        /// The decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A response payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A handler-chosen status and message.
    #[error("{status}: {message}")]
    Status {
        /// HTTP status to respond with.
        status: StatusCode,
        /// Message shown to the client.
        message: String,
    },

    /// Any other failure. Details are logged, never sent to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RouError {
    /// Creates an error carrying an explicit status and client message.
    #[must_use]
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates an internal error from a message.
    #[must_use]
    pub fn internal<M>(message: M) -> Self
    where
        M: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        Self::Internal(anyhow::Error::msg(message))
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            Self::Status { status, .. } => *status,
            Self::Serialization(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message safe to put in a response envelope.
    #[must_use]
    pub fn client_message(&self) -> &str {
        match self {
            Self::InvalidBody { .. } => MSG_INVALID_BODY,
            Self::Status { message, .. } => message,
            Self::Serialization(_) | Self::Internal(_) => MSG_INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_invalid_body() {
        let error = RouError::InvalidBody {
            source: json_error(),
        };
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.client_message(), "Request body is not valid");
        assert!(error.to_string().starts_with("Invalid request body"));
    }

    #[test]
    fn test_serialization_hides_details() {
        let error = RouError::Serialization(json_error());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.client_message(), "Internal server error");
    }

    #[test]
    fn test_status_error() {
        let error = RouError::status(StatusCode::UNAUTHORIZED, "Token expired");
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.client_message(), "Token expired");
        assert_eq!(error.to_string(), "401 Unauthorized: Token expired");
    }

    #[test]
    fn test_internal_from_anyhow() {
        let error: RouError = anyhow::anyhow!("database connection refused").into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.client_message(), "Internal server error");
        assert_eq!(error.to_string(), "database connection refused");
    }

    #[test]
    fn test_internal_message() {
        let error = RouError::internal("cache miss");
        assert!(matches!(error, RouError::Internal(_)));
        assert_eq!(error.to_string(), "cache miss");
    }

    #[test]
    fn test_question_mark_conversion() {
        fn fails() -> RouResult<()> {
            Err(anyhow::anyhow!("boom"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(RouError::Internal(_))));
    }
}
