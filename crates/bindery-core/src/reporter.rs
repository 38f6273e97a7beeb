//! Client-facing error rendering.
//!
//! [`ErrorReporter`] turns an [`ApiError`] into the `{ "status", "message" }`
//! shape sent to clients. Whether unclassified messages are shown is decided
//! once, when the reporter is built from configuration.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Message shown in place of a redacted internal error.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Whether unclassified error messages reach the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorExposure {
    /// Replace the message with [`INTERNAL_SERVER_ERROR_MESSAGE`].
    #[default]
    Redact,
    /// Show the real message.
    Expose,
}

impl ErrorExposure {
    /// Maps an `expose_server_errors` style flag to an exposure.
    #[must_use]
    pub const fn from_flag(expose: bool) -> Self {
        if expose {
            Self::Expose
        } else {
            Self::Redact
        }
    }

    /// Returns `true` if real messages are shown.
    #[must_use]
    pub const fn exposes(self) -> bool {
        matches!(self, Self::Expose)
    }
}

/// Error body returned to clients.
///
/// # Example
///
/// ```
/// use bindery_core::ClientError;
/// use http::StatusCode;
///
/// let err = ClientError::new(StatusCode::BAD_REQUEST, "page must be a valid integer");
/// let json = String::from_utf8(err.to_json().unwrap()).unwrap();
/// assert_eq!(json, r#"{"status":400,"message":"page must be a valid integer"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientError {
    /// Numeric HTTP status.
    pub status: u16,
    /// Message shown to the client.
    pub message: String,
}

impl ClientError {
    /// Creates a client error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Returns the status as a [`StatusCode`].
    ///
    /// Out-of-range values fall back to 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Serializes the error body as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Renders [`ApiError`]s for clients.
///
/// Build one at startup and share it; it is `Copy` and holds no state other
/// than the exposure setting.
///
/// # Example
///
/// ```
/// use bindery_core::{ApiError, ErrorExposure, ErrorReporter};
///
/// let err = ApiError::internal("connection pool exhausted");
///
/// let redacting = ErrorReporter::new(ErrorExposure::Redact);
/// assert_eq!(redacting.report(&err).message, "Internal Server Error");
///
/// let exposing = ErrorReporter::new(ErrorExposure::Expose);
/// assert_eq!(exposing.report(&err).message, "connection pool exhausted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorReporter {
    exposure: ErrorExposure,
}

impl ErrorReporter {
    /// Creates a reporter with the given exposure.
    #[must_use]
    pub const fn new(exposure: ErrorExposure) -> Self {
        Self { exposure }
    }

    /// Returns the configured exposure.
    #[must_use]
    pub const fn exposure(&self) -> ErrorExposure {
        self.exposure
    }

    /// Renders an error for the client.
    ///
    /// Errors with a status keep their status and message. Unclassified
    /// errors become a 500; they are logged with their real message either
    /// way.
    pub fn report(&self, err: &ApiError) -> ClientError {
        match err {
            ApiError::Status { status, message } => ClientError::new(*status, message.clone()),
            ApiError::Internal { message, source } => {
                match source {
                    Some(source) => tracing::error!(error = %message, cause = %source, "internal error"),
                    None => tracing::error!(error = %message, "internal error"),
                }

                let shown = if self.exposure.exposes() {
                    message.clone()
                } else {
                    INTERNAL_SERVER_ERROR_MESSAGE.to_string()
                };
                ClientError::new(StatusCode::INTERNAL_SERVER_ERROR, shown)
            }
        }
    }

    /// Converts and renders any error convertible into [`ApiError`].
    pub fn report_any<E: Into<ApiError>>(&self, err: E) -> ClientError {
        self.report(&err.into())
    }
}
