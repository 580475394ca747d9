//! Test error types.

use thiserror::Error;
use wayfinder::BindError;

/// Errors that can occur during testing.
#[derive(Debug, Error)]
pub enum TestError {
    /// The method is not a valid HTTP method token.
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// The request target is not a valid origin-form URI.
    #[error("Invalid request target: {0}")]
    InvalidTarget(String),

    /// No route accepted the request.
    #[error("No route for {method} {path}")]
    NoMatch {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },

    /// A route matched but a parameter did not bind.
    #[error(transparent)]
    Bind(#[from] BindError),
}
