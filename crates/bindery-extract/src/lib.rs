//! # Bindery Extract
//!
//! Declarative binding of request data onto typed records.
//!
//! A record declares, per field, where its value comes from with a
//! `location.key` annotation. The decoder looks the key up in a
//! [`RequestSource`], coerces the raw text to the field's declared type and
//! assigns it. A JSON body can be merged onto the same record in the same
//! call.
//!
//! ## Locations
//!
//! | Annotation | Source | Multi-valued |
//! |------------|--------|--------------|
//! | `path.<key>` | route parameters | no |
//! | `query.<key>` | query string | yes |
//! | `header.<key>` | headers | yes |
//!
//! Fields without an annotation are left to the body merge.
//!
//! ## Supported field types
//!
//! | Type | Text form |
//! |------|-----------|
//! | `String` | as is |
//! | `i8`..`i64`, `isize`, `u8`..`u64`, `usize` | decimal, range-checked |
//! | `f32`, `f64` | decimal |
//! | `bool` | `1`, `true`, `on`, `enabled`, `t` (any case) are true; all else false |
//! | [`Date`](bindery_core::Date) | `YYYY-MM-DD` |
//! | [`Timestamp`](bindery_core::Timestamp) | RFC 3339, truncated to seconds |
//! | [`ObjectId`](bindery_core::ObjectId) | 24 hex characters |
//! | `Option<T>` | absent or empty means `None` |
//! | `Vec<T>` | repeated key, or one comma-separated value |
//! | alias newtypes | as the wrapped type |
//!
//! A missing value for a non-optional field gives the type's zero value
//! (empty string, `0`, `false`), not an error.
//!
//! ## Example
//!
//! ```rust
//! use bindery_extract::{decode_fields, Bind, BindError, FieldSpec, FieldValue, RequestSource, Value};
//!
//! #[derive(Default)]
//! struct ListUsers {
//!     page: Option<u32>,
//!     tags: Vec<String>,
//! }
//!
//! // Usually generated by `#[derive(Bind)]`.
//! impl Bind for ListUsers {
//!     fn fields() -> Vec<FieldSpec> {
//!         vec![
//!             FieldSpec::bound("page", "query.page", <Option<u32>>::descriptor()),
//!             FieldSpec::bound("tags", "query.tag", <Vec<String>>::descriptor()),
//!         ]
//!     }
//!
//!     fn assign(&mut self, field: &str, value: Value) -> Result<(), BindError> {
//!         match field {
//!             "page" => self.page = FieldValue::from_value(value).map_err(|e| BindError::mismatch(field, e))?,
//!             "tags" => self.tags = FieldValue::from_value(value).map_err(|e| BindError::mismatch(field, e))?,
//!             _ => return Err(BindError::unknown_field(field)),
//!         }
//!         Ok(())
//!     }
//!
//!     fn value_of(&self, field: &str) -> Option<Value> {
//!         match field {
//!             "page" => Some(self.page.to_value()),
//!             "tags" => Some(self.tags.to_value()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let source = RequestSource::builder()
//!     .query("page", "3")
//!     .query("tag", "admin,staff")
//!     .build();
//!
//! let mut request = ListUsers::default();
//! decode_fields(&source, &mut request).unwrap();
//!
//! assert_eq!(request.page, Some(3));
//! assert_eq!(request.tags, vec!["admin", "staff"]);
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`BindError`] carrying the location, key and field
//! involved and a `400 Bad Request` status:
//!
//! ```rust
//! use bindery_extract::{coerce, FieldValue, Location, Lookup};
//!
//! let lookup = Lookup { location: Location::Query, key: "page", single: Some("99999999999999999999"), multi: None };
//! let err = coerce(&i64::descriptor(), &lookup).unwrap_err();
//!
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! assert_eq!(err.to_string(), "page must be a valid integer");
//! ```

#![doc(html_root_url = "https://docs.rs/bindery-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod coerce;
mod decode;
mod descriptor;
mod encode;
mod error;
mod extractor;
mod params;
mod schema;
mod source;
mod value;
mod values;

pub use body::merge_body;
pub use coerce::{coerce, Lookup};
pub use decode::{decode, decode_fields, DecodeOptions};
pub use descriptor::{DomainKind, FloatWidth, IntWidth, ScalarKind, TypeDescriptor};
pub use encode::{encode, encode_with_body};
pub use error::{BindError, BindErrorKind, Location};
pub use extractor::{Bound, Fields, FromRequest};
pub use params::Params;
pub use schema::{resolve, resolve_record, Bind, FieldBinding, FieldDescriptor, FieldSpec};
pub use source::{RequestSource, RequestSourceBuilder};
pub use value::{FieldValue, Value, ValueMismatch};
pub use values::MultiValues;

