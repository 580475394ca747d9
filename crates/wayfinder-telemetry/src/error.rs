//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The subscriber could not be installed, or the filter did not parse.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The configuration is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TelemetryError::LoggingInit("already set".to_string());
        assert_eq!(err.to_string(), "Failed to initialize logging: already set");

        let err = TelemetryError::InvalidConfig("empty service name".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: empty service name");
    }
}
