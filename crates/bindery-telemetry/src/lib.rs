//! Structured logging for Bindery services.
//!
//! Bindery emits `tracing` events while binding requests:
//!
//! | Level | Emitted by | When |
//! |-------|------------|------|
//! | `trace` | `bindery-extract` | every field bound (field, location, key, type) |
//! | `debug` | `bindery-extract` | a decode call fails (code, field, location, key) |
//! | `error` | `bindery-core` | an internal error is reported to a client |
//!
//! This crate installs the subscriber that turns those events into JSON or
//! human-readable output.
//!
//! # Example
//!
//! ```rust,ignore
//! use bindery_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&LogConfig::production())?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/bindery-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
