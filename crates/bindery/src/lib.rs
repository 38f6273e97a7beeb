//! # Bindery
//!
//! Binds HTTP request data onto typed records.
//!
//! A record declares, per field, where its value comes from
//! (`path`, `query` or `header`) and under which key. Bindery looks each key
//! up, converts the text into the field's type and assigns it, optionally
//! after merging a JSON body onto the same record. Failures become
//! client-facing errors with a status and a readable message.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bindery::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Bind, Default, Serialize, Deserialize)]
//! #[bind(crate = "bindery::extract")]
//! struct UpdateOrder {
//!     #[bind("path.orderId")]
//!     #[serde(skip)]
//!     order_id: ObjectId,
//!     #[bind("query.notify")]
//!     #[serde(skip)]
//!     notify: bool,
//!     note: String,
//! }
//!
//! fn handle(source: &RequestSource, reporter: &ErrorReporter) -> Result<(), ClientError> {
//!     let Bound(order) = Bound::<UpdateOrder>::from_request(source)
//!         .map_err(|e| reporter.report_any(e))?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! Generated code names `::bindery_extract` unless told otherwise, so a crate
//! depending only on the facade adds `#[bind(crate = "bindery::extract")]`
//! to each derived type:
//!
//! ```toml
//! [dependencies]
//! bindery = "0.1"
//! serde = { version = "1", features = ["derive"] }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! annotations -> resolve -> [body merge] -> per field: lookup -> coerce -> assign
//!                                                                  |
//!                                    BindError -> ApiError -> ErrorReporter -> ClientError
//! ```

#![doc(html_root_url = "https://docs.rs/bindery/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Domain scalars and client errors
pub use bindery_core as core;

// Binding engine
pub use bindery_extract as extract;

// Configuration
pub use bindery_config as config;

// Logging
pub use bindery_telemetry as telemetry;

// Derive macros
pub use bindery_macros::{Bind, BindAlias};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use bindery::prelude::*;
/// ```
pub mod prelude {
    pub use bindery_core::{
        ApiError, ApiResult, ClientError, Date, ErrorExposure, ErrorReporter, ObjectId, Timestamp,
    };

    pub use bindery_extract::{
        decode, decode_fields, encode, encode_with_body, Bind, BindError, BindErrorKind, Bound,
        DecodeOptions, FieldValue, Fields, FromRequest, Location, Params, RequestSource,
    };

    // Derives share names with the traits they implement
    pub use bindery_macros::{Bind, BindAlias};

    pub use bindery_config::{BinderyConfig, ConfigLoader};
    pub use bindery_telemetry::{init_logging, LogConfig};
}
