//! Telemetry configuration.

use crate::error::TelemetryError;
use crate::logging::{create_env_filter, LogConfig};
use crate::TelemetryResult;

/// Configuration for a service's telemetry.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name, stamped on log events.
    pub service_name: String,

    /// Environment (production, staging, development).
    pub environment: String,

    /// Logging configuration.
    pub logging: LogConfig,
}

impl TelemetryConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::new()
    }

    /// Checks that the configuration can be installed.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::InvalidConfig` for an empty service name or
    /// a log filter that does not parse.
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::InvalidConfig(
                "service name must not be empty".to_string(),
            ));
        }
        create_env_filter(&self.logging.filter_directive())
            .map_err(|e| TelemetryError::InvalidConfig(e.to_string()))?;
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wayfinder-service".to_string(),
            environment: "development".to_string(),
            logging: LogConfig::default(),
        }
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    environment: Option<String>,
    logging: Option<LogConfig>,
    routing_level: Option<String>,
}

impl TelemetryConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    /// Sets the environment.
    #[must_use]
    pub fn environment(mut self, env: &str) -> Self {
        self.environment = Some(env.to_string());
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn logging(mut self, config: LogConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// Sets the level for routing events, e.g. `"trace"` to see every
    /// match attempt.
    #[must_use]
    pub fn routing_level(mut self, level: &str) -> Self {
        self.routing_level = Some(level.to_string());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TelemetryConfig {
        let defaults = TelemetryConfig::default();

        let service_name = self.service_name.unwrap_or(defaults.service_name);
        let environment = self.environment.unwrap_or(defaults.environment);

        let mut logging = self.logging.unwrap_or(defaults.logging);
        logging.service_name = service_name.clone();
        if self.routing_level.is_some() {
            logging.routing_level = self.routing_level;
        }

        TelemetryConfig {
            service_name,
            environment,
            logging,
        }
    }
}
