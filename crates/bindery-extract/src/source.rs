//! The request source aggregate.
//!
//! [`RequestSource`] is the read-only view over one request that the decoder
//! binds from: path parameters, query parameters, headers and the raw body.

use bytes::Bytes;
use http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::coerce::Lookup;
use crate::decode::{decode, DecodeOptions};
use crate::error::{BindError, Location};
use crate::params::Params;
use crate::schema::Bind;
use crate::values::MultiValues;

/// All data a request offers for binding.
///
/// Header names are matched exactly as stored. When built with
/// [`from_http`](Self::from_http) they are lowercase, since `http` normalizes
/// them; a gateway that preserves the client's casing can hand them over
/// unchanged through the builder.
///
/// # Example
///
/// ```rust
/// use bindery_extract::RequestSource;
///
/// let source = RequestSource::builder()
///     .path_param("userId", "42")
///     .query("terms", "a")
///     .query("terms", "b")
///     .header("X-Tenant", "acme")
///     .body(r#"{"name":"Alice"}"#)
///     .build();
///
/// assert_eq!(source.path_params().get("userId"), Some("42"));
/// assert_eq!(source.query().get("terms"), Some("b"));
/// assert_eq!(source.headers().get("X-Tenant"), Some("acme"));
/// assert!(!source.body_is_base64());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestSource {
    path_params: Params,
    query: MultiValues,
    headers: MultiValues,
    body: Bytes,
    body_is_base64: bool,
}

impl RequestSource {
    /// Creates a source from its parts.
    #[must_use]
    pub fn new(
        path_params: Params,
        query: MultiValues,
        headers: MultiValues,
        body: Bytes,
        body_is_base64: bool,
    ) -> Self {
        Self {
            path_params,
            query,
            headers,
            body,
            body_is_base64,
        }
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> RequestSourceBuilder {
        RequestSourceBuilder::new()
    }

    /// Builds a source from an `http` request and the parameters its route
    /// matched.
    ///
    /// The query string is split into occurrences with repeated keys kept in
    /// order. Header values that are not valid UTF-8 are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query string is not valid URL encoding.
    pub fn from_http(request: &Request<Bytes>, path_params: Params) -> Result<Self, BindError> {
        let mut query = MultiValues::new();
        if let Some(raw) = request.uri().query() {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).map_err(|e| {
                BindError::invalid_value(Location::Query, "", format!("invalid query string: {e}"))
            })?;
            for (name, value) in pairs {
                query.push(name, value);
            }
        }

        let mut headers = MultiValues::new();
        for (name, value) in request.headers() {
            if let Ok(value) = value.to_str() {
                headers.push(name.as_str(), value);
            }
        }

        Ok(Self {
            path_params,
            query,
            headers,
            body: request.body().clone(),
            body_is_base64: false,
        })
    }

    /// Returns the path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Returns the query parameters.
    #[must_use]
    pub fn query(&self) -> &MultiValues {
        &self.query
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &MultiValues {
        &self.headers
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns true if the body is base64-wrapped.
    #[must_use]
    pub fn body_is_base64(&self) -> bool {
        self.body_is_base64
    }

    /// Looks up `key` at `location`.
    ///
    /// Path parameters only ever have a single value. Body lookups find
    /// nothing; body data is bound by the merge step instead.
    #[must_use]
    pub fn lookup<'a>(&'a self, location: Location, key: &'a str) -> Lookup<'a> {
        let (single, multi) = match location {
            Location::Path => (self.path_params.get(key), None),
            Location::Query => (self.query.get(key), self.query.get_all(key)),
            Location::Header => (self.headers.get(key), self.headers.get_all(key)),
            Location::Body => (None, None),
        };
        Lookup {
            location,
            key,
            single,
            multi,
        }
    }

    /// Decodes a fresh `T`, starting from its default value, with the body
    /// merged first.
    ///
    /// # Errors
    ///
    /// Returns the first binding failure.
    pub fn decode<T>(&self) -> Result<T, BindError>
    where
        T: Bind + Default + Serialize + DeserializeOwned,
    {
        let mut target = T::default();
        decode(self, &mut target, DecodeOptions::with_body())?;
        Ok(target)
    }
}

/// Builder for [`RequestSource`].
#[derive(Debug, Default)]
pub struct RequestSourceBuilder {
    source: RequestSource,
}

impl RequestSourceBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.source.path_params.insert(name, value);
        self
    }

    /// Sets all path parameters.
    #[must_use]
    pub fn path_params(mut self, params: Params) -> Self {
        self.source.path_params = params;
        self
    }

    /// Adds one query parameter occurrence.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.source.query.push(name, value);
        self
    }

    /// Sets the query parameters from precomputed views.
    #[must_use]
    pub fn query_values(mut self, values: MultiValues) -> Self {
        self.source.query = values;
        self
    }

    /// Adds one header occurrence.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.source.headers.push(name, value);
        self
    }

    /// Sets the headers from precomputed views.
    #[must_use]
    pub fn header_values(mut self, values: MultiValues) -> Self {
        self.source.headers = values;
        self
    }

    /// Sets a plain body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.source.body = body.into();
        self.source.body_is_base64 = false;
        self
    }

    /// Sets a base64-wrapped body.
    #[must_use]
    pub fn base64_body(mut self, body: impl Into<Bytes>) -> Self {
        self.source.body = body.into();
        self.source.body_is_base64 = true;
        self
    }

    /// Builds the source.
    #[must_use]
    pub fn build(self) -> RequestSource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_keeps_repeated_query_keys() {
        let request = Request::builder()
            .uri("/search?terms=a&terms=b&page=2&q=hello%20world")
            .header("X-Request-Id", "abc")
            .body(Bytes::from_static(b"{}"))
            .unwrap();
        let params: Params = [("tenant", "acme")].into_iter().collect();

        let source = RequestSource::from_http(&request, params).unwrap();

        assert_eq!(source.query().get("terms"), Some("b"));
        assert_eq!(source.query().get_all("terms").map(<[String]>::len), Some(2));
        assert_eq!(source.query().get("q"), Some("hello world"));
        assert_eq!(source.headers().get("x-request-id"), Some("abc"));
        assert_eq!(source.path_params().get("tenant"), Some("acme"));
        assert_eq!(source.body().as_ref(), b"{}");
        assert!(!source.body_is_base64());
    }

    #[test]
    fn test_from_http_without_query() {
        let request = Request::builder().uri("/").body(Bytes::new()).unwrap();
        let source = RequestSource::from_http(&request, Params::new()).unwrap();
        assert!(source.query().is_empty());
    }

    #[test]
    fn test_from_http_skips_non_utf8_headers() {
        let request = Request::builder()
            .uri("/")
            .header("x-raw", http::HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap())
            .header("x-ok", "fine")
            .body(Bytes::new())
            .unwrap();
        let source = RequestSource::from_http(&request, Params::new()).unwrap();

        assert!(!source.headers().contains_key("x-raw"));
        assert_eq!(source.headers().get("x-ok"), Some("fine"));
    }

    #[test]
    fn test_lookup_by_location() {
        let source = RequestSource::builder()
            .path_param("id", "7")
            .query("tag", "x")
            .query("tag", "y")
            .header("X-Id", "h")
            .build();

        let path = source.lookup(Location::Path, "id");
        assert_eq!(path.single, Some("7"));
        assert!(path.multi.is_none());

        let query = source.lookup(Location::Query, "tag");
        assert_eq!(query.single, Some("y"));
        assert_eq!(query.multi.map(<[String]>::len), Some(2));

        assert_eq!(source.lookup(Location::Header, "X-Id").single, Some("h"));
        assert!(source.lookup(Location::Header, "x-id").is_absent());
        assert!(source.lookup(Location::Body, "id").is_absent());
    }

    #[test]
    fn test_builder_body_flags() {
        let plain = RequestSource::builder().body("e30=").build();
        assert!(!plain.body_is_base64());

        let wrapped = RequestSource::builder().base64_body("e30=").build();
        assert!(wrapped.body_is_base64());
        assert_eq!(wrapped.body().as_ref(), b"e30=");
    }

    #[test]
    fn test_precomputed_views() {
        let mut query = MultiValues::new();
        query.insert_single("page", "3");
        let source = RequestSource::builder().query_values(query).build();

        let lookup = source.lookup(Location::Query, "page");
        assert_eq!(lookup.single, Some("3"));
        assert!(lookup.multi.is_none());
    }
}
