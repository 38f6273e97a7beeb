//! Binding error types.
//!
//! Every failure of a decode call is a [`BindError`]: a malformed binding
//! annotation, a value that does not parse as the field's type, or a body
//! that cannot be decoded. All of them are client errors by default and
//! convert into [`ApiError`] with their status and message intact.

use std::fmt;

use bindery_core::ApiError;
use http::StatusCode;
use thiserror::Error;

use crate::value::ValueMismatch;

/// Where a bound value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Path parameters (e.g., `/users/{id}`)
    Path,
    /// Query string parameters
    Query,
    /// HTTP headers
    Header,
    /// Request body
    Body,
}

impl Location {
    /// Parses the location component of a binding annotation.
    ///
    /// Only `path`, `query` and `header` can appear in annotations; body
    /// fields are populated by the body merge step instead.
    #[must_use]
    pub fn from_binding_token(token: &str) -> Option<Self> {
        match token {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            _ => None,
        }
    }

    /// Returns the annotation token for this location.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a [`BindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindErrorKind {
    /// Malformed binding annotation or unsupported field type.
    Descriptor,
    /// Source value does not parse as the field's type.
    InvalidValue,
    /// Body could not be decoded or parsed.
    Body,
    /// A record's field implementation disagrees with its descriptor.
    Mismatch,
}

/// Error raised while binding request data onto a record.
///
/// # Example
///
/// ```rust
/// use bindery_extract::{BindError, Location};
/// use http::StatusCode;
///
/// let err = BindError::invalid_value(Location::Query, "page", "page must be a valid integer");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.location(), Some(Location::Query));
/// assert_eq!(err.key(), Some("page"));
/// assert_eq!(err.to_string(), "page must be a valid integer");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BindError {
    kind: BindErrorKind,
    location: Option<Location>,
    field: Option<String>,
    key: Option<String>,
    status: StatusCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BindError {
    fn new(kind: BindErrorKind, message: String) -> Self {
        Self {
            kind,
            location: None,
            field: None,
            key: None,
            status: StatusCode::BAD_REQUEST,
            message,
            source: None,
        }
    }

    /// Creates an error for a malformed binding on `field`.
    #[must_use]
    pub fn descriptor(field: impl Into<String>, details: impl fmt::Display) -> Self {
        let field = field.into();
        let mut err = Self::new(
            BindErrorKind::Descriptor,
            format!("invalid binding on field '{field}': {details}"),
        );
        err.field = Some(field);
        err
    }

    /// Creates an error for a field name the record does not know.
    #[must_use]
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::descriptor(field, "no such field on record")
    }

    /// Creates an error for a value that failed to parse.
    ///
    /// `message` is shown to the client verbatim and should name the key.
    #[must_use]
    pub fn invalid_value(
        location: Location,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut err = Self::new(BindErrorKind::InvalidValue, message.into());
        err.location = Some(location);
        err.key = Some(key.into());
        err
    }

    /// Creates an error for a base64 body that failed to decode.
    #[must_use]
    pub fn body_decoding(source: base64::DecodeError) -> Self {
        let mut err = Self::new(BindErrorKind::Body, format!("failed decoding body: {source}"));
        err.location = Some(Location::Body);
        err.source = Some(Box::new(source));
        err
    }

    /// Creates an error for a body that is not a valid document.
    #[must_use]
    pub fn invalid_body(source: serde_json::Error) -> Self {
        let mut err = Self::new(BindErrorKind::Body, format!("invalid request body: {source}"));
        err.location = Some(Location::Body);
        err.source = Some(Box::new(source));
        err
    }

    /// Creates an error for a body that parsed but has the wrong shape.
    #[must_use]
    pub fn invalid_body_shape(details: impl fmt::Display) -> Self {
        let mut err = Self::new(BindErrorKind::Body, format!("invalid request body: {details}"));
        err.location = Some(Location::Body);
        err
    }

    /// Creates an error for a target record that could not take part in a
    /// body merge.
    ///
    /// This is a server-side fault and defaults to `500`.
    #[must_use]
    pub fn merge_target(source: serde_json::Error) -> Self {
        let mut err = Self::new(
            BindErrorKind::Body,
            format!("cannot merge body onto target: {source}"),
        );
        err.location = Some(Location::Body);
        err.status = StatusCode::INTERNAL_SERVER_ERROR;
        err.source = Some(Box::new(source));
        err
    }

    /// Creates an error for a value the field's type could not accept.
    #[must_use]
    pub fn mismatch(field: impl Into<String>, mismatch: ValueMismatch) -> Self {
        let field = field.into();
        let mut err = Self::new(
            BindErrorKind::Mismatch,
            format!("cannot assign field '{field}': {mismatch}"),
        );
        err.field = Some(field);
        err.source = Some(Box::new(mismatch));
        err
    }

    /// Attaches the record field name.
    #[must_use]
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Overrides the default `400 Bad Request` status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> BindErrorKind {
        self.kind
    }

    /// Returns the source location, if known.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Returns the record field name, if known.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the source key, if known.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Returns the error code suitable for logs and error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            BindErrorKind::Descriptor => "INVALID_BINDING",
            BindErrorKind::InvalidValue => "INVALID_PARAMETER",
            BindErrorKind::Body => "INVALID_BODY",
            BindErrorKind::Mismatch => "BINDING_MISMATCH",
        }
    }
}

/// Client errors keep their status and message. Server-side failures become
/// unclassified errors, so their message is subject to redaction.
impl From<BindError> for ApiError {
    fn from(err: BindError) -> Self {
        if err.status.is_server_error() {
            ApiError::internal(err.message)
        } else {
            ApiError::with_status(err.status, err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn test_descriptor_error() {
        let err = BindError::descriptor("page", "invalid location 'cookie'");

        assert_eq!(err.kind(), BindErrorKind::Descriptor);
        assert_eq!(err.field(), Some("page"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_BINDING");
        assert!(err.to_string().contains("page"));
        assert!(err.to_string().contains("cookie"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = BindError::invalid_value(Location::Header, "X-Limit", "X-Limit must be a valid integer")
            .for_field("limit");

        assert_eq!(err.location(), Some(Location::Header));
        assert_eq!(err.key(), Some("X-Limit"));
        assert_eq!(err.field(), Some("limit"));
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_body_decoding_error() {
        let cause = base64::engine::general_purpose::STANDARD
            .decode("not base64!")
            .unwrap_err();
        let err = BindError::body_decoding(cause);

        assert_eq!(err.location(), Some(Location::Body));
        assert!(err.to_string().starts_with("failed decoding body: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_body_embeds_parser_message() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parser_text = cause.to_string();
        let err = BindError::invalid_body(cause);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), format!("invalid request body: {parser_text}"));
    }

    #[test]
    fn test_status_override() {
        let err = BindError::invalid_body_shape("too deep").with_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_into_api_error_keeps_status_and_message() {
        let err = BindError::invalid_value(Location::Query, "page", "page must be a valid integer");
        let api: ApiError = err.into();

        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert!(!api.is_internal());
        assert_eq!(api.message(), "page must be a valid integer");
    }

    #[test]
    fn test_merge_target_is_internal() {
        let cause = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = BindError::merge_target(cause);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let api: ApiError = err.into();
        assert!(api.is_internal());
    }

    #[test]
    fn test_location_tokens() {
        assert_eq!(Location::from_binding_token("path"), Some(Location::Path));
        assert_eq!(Location::from_binding_token("query"), Some(Location::Query));
        assert_eq!(Location::from_binding_token("header"), Some(Location::Header));
        assert_eq!(Location::from_binding_token("body"), None);
        assert_eq!(Location::from_binding_token("Query"), None);
        assert_eq!(Location::Header.to_string(), "header");
    }
}
