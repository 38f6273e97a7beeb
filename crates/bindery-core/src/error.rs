//! Error types for Bindery.
//!
//! [`ApiError`] is the error type handlers return. It has exactly two shapes:
//! errors that already carry an HTTP status (client errors, including every
//! binding failure) and unclassified errors, which render as a 500 and whose
//! message is subject to the reporter's exposure setting.

use http::StatusCode;
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard error type for request handling.
///
/// # Example
///
/// ```
/// use bindery_core::ApiError;
/// use http::StatusCode;
///
/// fn find_user(id: &str) -> Result<(), ApiError> {
///     if id.is_empty() {
///         return Err(ApiError::bad_request("id must not be empty"));
///     }
///     Err(ApiError::with_status(StatusCode::NOT_FOUND, format!("user {id} not found")))
/// }
///
/// assert_eq!(find_user("").unwrap_err().status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(find_user("42").unwrap_err().status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// An error constructed with an explicit HTTP status.
    ///
    /// The message is always shown to the client.
    #[error("{message}")]
    Status {
        /// Status returned to the client.
        status: StatusCode,
        /// Human-readable error message.
        message: String,
    },

    /// An error without a status.
    ///
    /// Rendered as `500 Internal Server Error`; the message is only shown
    /// when server errors are exposed.
    #[error("{message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl ApiError {
    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }

    /// Creates an error carrying an explicit status.
    #[must_use]
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates an unclassified error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unclassified error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Status { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` for errors that did not carry a status.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns the message without any source chain.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } | Self::Internal { message, .. } => message,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Failure to parse a domain scalar from its text form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseScalarError {
    /// Not a `YYYY-MM-DD` calendar date.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    Date(String),

    /// Not an RFC 3339 timestamp.
    #[error("invalid timestamp '{0}': expected RFC 3339")]
    Timestamp(String),

    /// Not 24 hexadecimal characters.
    #[error("invalid identifier '{0}'")]
    Identifier(String),
}
