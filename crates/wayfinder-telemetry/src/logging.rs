//! Structured logging for Wayfinder.
//!
//! The routing crates only emit `tracing` events: route registration and
//! router builds at `debug`, match attempts at `trace`, and bind failures
//! at `debug`. This module installs a subscriber that renders them.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfinder_telemetry::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig {
//!     routing_level: Some("trace".to_string()),
//!     ..LogConfig::development()
//! };
//! init_logging(&config)?;
//! ```

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, TestWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Targets of the crates that emit routing events.
pub const ROUTING_TARGETS: [&str; 3] = ["wayfinder", "wayfinder_router", "wayfinder_bind"];

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Base log level or filter directive (e.g., "info", "my_app=debug").
    pub level: String,

    /// Level applied to the routing crates only, overriding `level` for them.
    pub routing_level: Option<String>,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include span events (new, close).
    pub span_events: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include thread IDs.
    pub thread_ids: bool,

    /// Whether to include target (module path).
    pub include_target: bool,

    /// Whether to write through the test harness's captured output.
    pub test_writer: bool,

    /// Service name for log fields.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            routing_level: None,
            json_format: true,
            span_events: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
            test_writer: false,
            service_name: "wayfinder".to_string(),
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            ..Self::default()
        }
    }

    /// Creates a production configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Creates a configuration for tests: plain output captured by the test
    /// harness, with routing events down to `trace`.
    #[must_use]
    pub fn testing() -> Self {
        Self {
            level: "warn".to_string(),
            routing_level: Some("trace".to_string()),
            json_format: false,
            test_writer: true,
            ..Self::default()
        }
    }

    /// Returns the filter directive string this configuration installs.
    ///
    /// ```rust
    /// use wayfinder_telemetry::LogConfig;
    ///
    /// let config = LogConfig {
    ///     routing_level: Some("trace".to_string()),
    ///     ..LogConfig::default()
    /// };
    /// assert_eq!(
    ///     config.filter_directive(),
    ///     "info,wayfinder=trace,wayfinder_router=trace,wayfinder_bind=trace"
    /// );
    /// ```
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let mut directive = self.level.clone();
        if let Some(routing) = &self.routing_level {
            for target in ROUTING_TARGETS {
                directive.push(',');
                directive.push_str(target);
                directive.push('=');
                directive.push_str(routing);
            }
        }
        directive
    }
}

/// Initializes the logging subsystem.
///
/// Returns `Ok` without doing anything if logging is disabled.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the filter does not parse or a
/// global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.filter_directive())?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let writer = if config.test_writer {
        BoxMakeWriter::new(TestWriter::new())
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_thread_ids(config.thread_ids)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_thread_ids(config.thread_ids)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::debug!(service.name = config.service_name.as_str(), "logging initialized");
    Ok(())
}

/// Creates an env filter from a directive string.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the directive is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log filter '{filter}': {e}")))
}

/// Field names used by the routing crates' events.
pub mod fields {
    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "http.method";

    /// Raw request path field name.
    pub const HTTP_PATH: &str = "http.path";

    /// Route template field name.
    pub const ROUTE_TEMPLATE: &str = "route.template";

    /// Position of the matched route in registration order.
    pub const ROUTE_INDEX: &str = "route.index";

    /// Capture name of a parameter that failed to bind.
    pub const PARAM_NAME: &str = "param.name";

    /// Declared type of a parameter that failed to bind.
    pub const PARAM_TYPE: &str = "param.type_name";

    /// Service name field name.
    pub const SERVICE_NAME: &str = "service.name";
}
