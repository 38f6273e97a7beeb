//! Typed configuration for Bindery services.
//!
//! Two settings matter at runtime: whether unclassified server errors are
//! shown to clients, and how logs are emitted. Both are read once at
//! startup.
//!
//! # Example
//!
//! ```no_run
//! use bindery_config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("bindery.toml")?
//!     .with_env_prefix("BINDERY")
//!     .load()?;
//!
//! bindery_telemetry::init_logging(&config.logging.to_log_config())?;
//! let reporter = config.errors.reporter();
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [errors]
//! expose_server_errors = false
//!
//! [logging]
//! enabled = true
//! level = "info,bindery_extract=debug"
//! format = "json"
//! ansi_enabled = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `BINDERY__ERRORS__EXPOSE_SERVER_ERRORS=true`
//! - `BINDERY__LOGGING__LEVEL=debug`
//! - `BINDERY__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;

pub use bindery_telemetry::LogFormat;
pub use config::{BinderyConfig, ErrorsConfig, LoggingConfig};
pub use error::ConfigError;
pub use loader::ConfigLoader;
