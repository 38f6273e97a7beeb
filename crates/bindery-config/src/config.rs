//! Configuration types.
//!
//! [`BinderyConfig`] is the root; each section maps onto the runtime object
//! it configures.

use bindery_core::{ErrorExposure, ErrorReporter};
use bindery_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Complete Bindery configuration.
///
/// # Example
///
/// ```
/// use bindery_config::BinderyConfig;
///
/// let config = BinderyConfig::default();
/// assert!(!config.errors.expose_server_errors);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct BinderyConfig {
    /// Client error rendering.
    #[serde(default)]
    pub errors: ErrorsConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BinderyConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `logging.level` is not a
    /// valid filter directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        bindery_telemetry::create_env_filter(&self.logging.level)
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        Ok(())
    }

    /// Development preset: pretty logs with binding traces and exposed
    /// server errors.
    #[must_use]
    pub fn development() -> Self {
        let log = LogConfig::development();
        Self {
            errors: ErrorsConfig {
                expose_server_errors: true,
            },
            logging: LoggingConfig {
                enabled: log.enabled,
                level: log.level,
                format: log.format,
                ansi_enabled: log.ansi_enabled,
            },
        }
    }

    /// Production preset: JSON logs and redacted server errors.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

/// Client error rendering settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Show the real message of unclassified (500) errors to clients.
    #[serde(default)]
    pub expose_server_errors: bool,
}

impl ErrorsConfig {
    /// Builds the error reporter for this setting.
    ///
    /// ```
    /// use bindery_config::ErrorsConfig;
    /// use bindery_core::ErrorExposure;
    ///
    /// let reporter = ErrorsConfig { expose_server_errors: true }.reporter();
    /// assert_eq!(reporter.exposure(), ErrorExposure::Expose);
    /// ```
    #[must_use]
    pub const fn reporter(&self) -> ErrorReporter {
        ErrorReporter::new(ErrorExposure::from_flag(self.expose_server_errors))
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Whether logging is installed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive, e.g. `"info"` or `"warn,bindery_extract=trace"`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colors in pretty output.
    #[serde(default)]
    pub ansi_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: LogFormat::Json,
            ansi_enabled: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's [`LogConfig`].
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            ansi_enabled: self.ansi_enabled,
            file_line_info: self.format == LogFormat::Pretty,
            ..LogConfig::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}
