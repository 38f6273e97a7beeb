//! Extractor trait and record extractors.
//!
//! [`FromRequest`] builds a value from a [`RequestSource`]. [`Bound`] and
//! [`Fields`] decode bindable records; tuples and `Option` compose them.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::decode::{decode, decode_fields, DecodeOptions};
use crate::error::BindError;
use crate::schema::Bind;
use crate::source::RequestSource;

/// Types that can be extracted from a request.
///
/// # Implementing `FromRequest`
///
/// ```rust
/// use bindery_extract::{BindError, FromRequest, Location, RequestSource};
///
/// struct ApiVersion(u32);
///
/// impl FromRequest for ApiVersion {
///     fn from_request(source: &RequestSource) -> Result<Self, BindError> {
///         let text = source.headers().get("X-Api-Version").unwrap_or("1");
///         text.parse().map(ApiVersion).map_err(|_| {
///             BindError::invalid_value(
///                 Location::Header,
///                 "X-Api-Version",
///                 "X-Api-Version must be a valid, positive integer",
///             )
///         })
///     }
/// }
///
/// let source = RequestSource::builder().header("X-Api-Version", "2").build();
/// assert_eq!(ApiVersion::from_request(&source).unwrap().0, 2);
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the request.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if extraction fails.
    fn from_request(source: &RequestSource) -> Result<Self, BindError>;
}

// Optional extraction: None if it fails.
impl<T: FromRequest> FromRequest for Option<T> {
    fn from_request(source: &RequestSource) -> Result<Self, BindError> {
        Ok(T::from_request(source).ok())
    }
}

impl<T: FromRequest> FromRequest for Result<T, BindError> {
    fn from_request(source: &RequestSource) -> Result<Self, BindError> {
        Ok(T::from_request(source))
    }
}

macro_rules! impl_from_request_for_tuple {
    ($($T:ident),*) => {
        impl<$($T: FromRequest),*> FromRequest for ($($T,)*) {
            fn from_request(source: &RequestSource) -> Result<Self, BindError> {
                Ok(($($T::from_request(source)?,)*))
            }
        }
    };
}

impl_from_request_for_tuple!(T1);
impl_from_request_for_tuple!(T1, T2);
impl_from_request_for_tuple!(T1, T2, T3);
impl_from_request_for_tuple!(T1, T2, T3, T4);

/// A record decoded from the body and its annotated fields.
///
/// The JSON body is merged onto `T::default()` first, then path, query and
/// header bindings are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound<T>(pub T);

impl<T> Bound<T> {
    /// Consumes the extractor and returns the record.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Bound<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for Bound<T>
where
    T: Bind + Default + Serialize + DeserializeOwned,
{
    fn from_request(source: &RequestSource) -> Result<Self, BindError> {
        let mut record = T::default();
        decode(source, &mut record, DecodeOptions::with_body())?;
        Ok(Self(record))
    }
}

/// A record decoded from its annotated fields only; the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<T>(pub T);

impl<T> Fields<T> {
    /// Consumes the extractor and returns the record.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Fields<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Bind + Default> FromRequest for Fields<T> {
    fn from_request(source: &RequestSource) -> Result<Self, BindError> {
        let mut record = T::default();
        decode_fields(source, &mut record)?;
        Ok(Self(record))
    }
}
