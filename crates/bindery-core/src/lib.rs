//! # Bindery Core
//!
//! Core types shared by every Bindery crate.
//!
//! This crate provides:
//!
//! - [`Date`], [`Timestamp`], [`ObjectId`] - domain scalars with a fixed text form
//! - [`ApiError`] - errors that either carry an HTTP status or are unclassified
//! - [`ErrorReporter`] - renders any [`ApiError`] as a [`ClientError`], redacting
//!   unclassified messages unless [`ErrorExposure::Expose`] is configured

#![doc(html_root_url = "https://docs.rs/bindery-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date;
mod error;
mod object_id;
mod reporter;
mod timestamp;

pub use date::Date;
pub use error::{ApiError, ApiResult, ParseScalarError};
pub use object_id::ObjectId;
pub use reporter::{ClientError, ErrorExposure, ErrorReporter, INTERNAL_SERVER_ERROR_MESSAGE};
pub use timestamp::Timestamp;
