//! Bind error type.
//!
//! A [`BindError`] is an ordinary request-time outcome: the route matched,
//! but one of the captured tokens could not be converted to the type the
//! handler declared.

use http::StatusCode;
use thiserror::Error;

/// A captured token could not be converted to its declared type.
///
/// The `Display` form is the caller-visible diagnostic, e.g.
/// `Cannot parse parameter a as Int: For input string: "foo"`.
///
/// # Example
///
/// ```rust
/// use wayfinder_bind::BindError;
/// use http::StatusCode;
///
/// let err = BindError::new("a", "Int", "For input string: \"foo\"");
/// assert_eq!(err.param(), "a");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(
///     err.to_string(),
///     "Cannot parse parameter a as Int: For input string: \"foo\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot parse parameter {param} as {type_name}: {cause}")]
pub struct BindError {
    param: String,
    type_name: String,
    cause: String,
}

impl BindError {
    /// Creates a bind error.
    #[must_use]
    pub fn new(
        param: impl Into<String>,
        type_name: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            param: param.into(),
            type_name: type_name.into(),
            cause: cause.into(),
        }
    }

    /// Returns the name of the capture that failed to bind.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Returns the name of the declared parameter type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the binder's failure message.
    #[must_use]
    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// Returns the HTTP status a transport should render this error with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "INVALID_PATH_PARAMETER"
    }
}
