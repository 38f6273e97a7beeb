//! Derive macros for Bindery.
//!
//! - `#[derive(Bind)]` makes a struct with named fields bindable from request
//!   data. Fields carry `#[bind("location.key")]` annotations; fields without
//!   one are left to the body merge.
//! - `#[derive(BindAlias)]` turns a single-field tuple struct into a field
//!   type that parses like the type it wraps.
//!
//! Generated code refers to `::bindery_extract` by default. Crates that only
//! depend on the `bindery` facade point it at the re-export instead with
//! `#[bind(crate = "bindery::extract")]` on the struct.
//!
//! # Example
//!
//! ```rust,ignore
//! use bindery::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(BindAlias, Debug, Clone, PartialEq)]
//! #[bind(crate = "bindery::extract")]
//! struct Status(String);
//!
//! #[derive(Bind, Default, Serialize, Deserialize)]
//! #[bind(crate = "bindery::extract")]
//! struct ListOrders {
//!     #[bind("path.customerId")]
//!     #[serde(skip)]
//!     customer: ObjectId,
//!     #[bind("query.status")]
//!     #[serde(skip)]
//!     statuses: Vec<Option<Status>>,
//!     note: String,
//! }
//! ```
//!
//! # Generated Code
//!
//! For the record above, `#[derive(Bind)]` generates approximately:
//!
//! ```rust,ignore
//! impl Bind for ListOrders {
//!     fn fields() -> Vec<FieldSpec> {
//!         vec![
//!             FieldSpec::bound("customer", "path.customerId", <ObjectId as FieldValue>::descriptor()),
//!             FieldSpec::bound("statuses", "query.status", <Vec<Option<Status>> as FieldValue>::descriptor()),
//!             FieldSpec::unbound("note"),
//!         ]
//!     }
//!
//!     fn assign(&mut self, field: &str, value: Value) -> Result<(), BindError> {
//!         match field {
//!             "customer" => { self.customer = FieldValue::from_value(value).map_err(..)?; Ok(()) }
//!             "statuses" => { self.statuses = FieldValue::from_value(value).map_err(..)?; Ok(()) }
//!             _ => Err(BindError::unknown_field(field)),
//!         }
//!     }
//!
//!     fn value_of(&self, field: &str) -> Option<Value> { /* same dispatch */ }
//! }
//! ```

mod alias;
mod bind;
mod parse;

use proc_macro::TokenStream;

/// Derives `bindery_extract::Bind` for a struct with named fields.
///
/// # Attributes
///
/// - `#[bind("location.key")]` on a field: bind it from `location`
///   (`path`, `query` or `header`) under `key`. The text is checked when the
///   record is first decoded; a malformed annotation makes every decode of
///   the record fail with a descriptor error.
///
/// - `#[bind(crate = "path")]` on the struct: path of the binding crate in
///   generated code, `::bindery_extract` when omitted.
///
/// Every annotated field's type must implement `FieldValue`.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::expand_bind(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `bindery_extract::FieldValue` for a single-field tuple struct.
///
/// The newtype parses and renders exactly like the wrapped type, and its
/// descriptor is an alias named after the struct. The wrapped type must be a
/// scalar or domain scalar; aliases of `Option` or `Vec` are rejected when a
/// record using them is decoded. Accepts `#[bind(crate = "path")]` like
/// `Bind`.
#[proc_macro_derive(BindAlias, attributes(bind))]
pub fn derive_bind_alias(input: TokenStream) -> TokenStream {
    alias::expand_alias(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
