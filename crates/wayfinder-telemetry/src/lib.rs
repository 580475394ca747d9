//! Logging setup for Wayfinder services.
//!
//! The routing crates emit `tracing` events and never install a subscriber
//! themselves. This crate installs one, configured from typed structs:
//!
//! - [`LogConfig`] selects the level, JSON or human-readable output, and an
//!   optional separate level for the routing crates
//! - [`TelemetryConfig`] adds the service identity and is assembled with
//!   [`TelemetryConfigBuilder`]
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfinder_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("gateway")
//!     .environment("production")
//!     .routing_level("debug")
//!     .build();
//!
//! init_telemetry(&config)?;
//! ```

#![doc(html_root_url = "https://docs.rs/wayfinder-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod logging;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Validates `config` and installs its logging subscriber.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a global subscriber
/// is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    config.validate()?;
    init_logging(&config.logging)?;
    tracing::info!(
        service.name = config.service_name.as_str(),
        environment = config.environment.as_str(),
        "telemetry initialized"
    );
    Ok(())
}
