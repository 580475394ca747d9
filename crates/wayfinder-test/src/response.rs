//! Test response wrapper.

use std::fmt;

use http::{Method, StatusCode};
use wayfinder::BindError;

use crate::error::TestError;

/// What happened to a request.
#[derive(Debug)]
pub enum Outcome<R> {
    /// A route matched and its handler produced a value.
    Handled(R),
    /// No route accepted the request.
    NoMatch,
    /// A route matched but a parameter failed to bind.
    BindError(BindError),
}

/// The result of sending a test request, with assertion helpers.
#[derive(Debug)]
pub struct TestResponse<R> {
    method: Method,
    path: String,
    template: Option<String>,
    is_async: bool,
    outcome: Outcome<R>,
}

impl<R> TestResponse<R> {
    pub(crate) fn new(
        method: Method,
        path: String,
        template: Option<String>,
        is_async: bool,
        outcome: Outcome<R>,
    ) -> Self {
        Self {
            method,
            path,
            template,
            is_async,
            outcome,
        }
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the template of the route that matched.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Returns true if the matched route's handler was asynchronous.
    #[must_use]
    pub fn was_async(&self) -> bool {
        self.is_async
    }

    /// Returns the outcome.
    #[must_use]
    pub fn outcome(&self) -> &Outcome<R> {
        &self.outcome
    }

    /// Returns true if a handler produced a value.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self.outcome, Outcome::Handled(_))
    }

    /// Returns true if no route matched.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self.outcome, Outcome::NoMatch)
    }

    /// Returns the handler's value.
    #[must_use]
    pub fn value(&self) -> Option<&R> {
        match &self.outcome {
            Outcome::Handled(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the bind error.
    #[must_use]
    pub fn bind_error(&self) -> Option<&BindError> {
        match &self.outcome {
            Outcome::BindError(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the status a transport would answer with: 200 for a handled
    /// request, 404 for no match, and the bind error's status otherwise.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.outcome {
            Outcome::Handled(_) => StatusCode::OK,
            Outcome::NoMatch => StatusCode::NOT_FOUND,
            Outcome::BindError(err) => err.status_code(),
        }
    }

    /// Converts into the handler's value, or the reason there is none.
    pub fn into_result(self) -> Result<R, TestError> {
        match self.outcome {
            Outcome::Handled(value) => Ok(value),
            Outcome::NoMatch => Err(TestError::NoMatch {
                method: self.method.to_string(),
                path: self.path,
            }),
            Outcome::BindError(err) => Err(TestError::Bind(err)),
        }
    }

    /// Asserts that a handler produced a value and returns it.
    ///
    /// # Panics
    ///
    /// Panics if no route matched or a parameter failed to bind.
    #[track_caller]
    pub fn assert_handled(&self) -> &R {
        match &self.outcome {
            Outcome::Handled(value) => value,
            Outcome::NoMatch => panic!(
                "expected {} {} to be handled, but no route matched",
                self.method, self.path
            ),
            Outcome::BindError(err) => panic!(
                "expected {} {} to be handled, but binding failed: {err}",
                self.method, self.path
            ),
        }
    }

    /// Asserts that no route matched.
    ///
    /// # Panics
    ///
    /// Panics if a route matched.
    #[track_caller]
    pub fn assert_no_match(&self) -> &Self {
        assert!(
            self.is_no_match(),
            "expected no route to match {} {}, but '{}' did",
            self.method,
            self.path,
            self.template.as_deref().unwrap_or_default()
        );
        self
    }

    /// Asserts that binding failed with exactly `message`.
    ///
    /// # Panics
    ///
    /// Panics if the request was handled, did not match, or failed with a
    /// different message.
    #[track_caller]
    pub fn assert_bind_error(&self, message: &str) -> &BindError {
        match &self.outcome {
            Outcome::BindError(err) => {
                assert_eq!(err.to_string(), message, "unexpected bind error message");
                err
            }
            Outcome::Handled(_) => panic!(
                "expected a bind error for {} {}, but it was handled",
                self.method, self.path
            ),
            Outcome::NoMatch => panic!(
                "expected a bind error for {} {}, but no route matched",
                self.method, self.path
            ),
        }
    }
}

impl<R: fmt::Display> TestResponse<R> {
    /// Renders the response as a transport would: the handler's value, the
    /// bind error's message, or `None` when nothing matched.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Handled(value) => Some(value.to_string()),
            Outcome::BindError(err) => Some(err.to_string()),
            Outcome::NoMatch => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(outcome: Outcome<String>) -> TestResponse<String> {
        TestResponse::new(
            Method::GET,
            "/foo".to_string(),
            Some("/:a".to_string()),
            false,
            outcome,
        )
    }

    #[test]
    fn test_handled() {
        let response = response(Outcome::Handled("int 1".to_string()));
        assert!(response.is_handled());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.assert_handled(), "int 1");
        assert_eq!(response.render().as_deref(), Some("int 1"));
        assert_eq!(response.into_result().unwrap(), "int 1");
    }

    #[test]
    fn test_no_match() {
        let response = TestResponse::<String>::new(
            Method::POST,
            "/nowhere".to_string(),
            None,
            false,
            Outcome::NoMatch,
        );
        response.assert_no_match();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.render().is_none());
        assert_eq!(
            response.into_result().unwrap_err().to_string(),
            "No route for POST /nowhere"
        );
    }

    #[test]
    fn test_bind_error() {
        let response = response(Outcome::BindError(BindError::new(
            "a",
            "Int",
            "For input string: \"foo\"",
        )));

        let err = response
            .assert_bind_error("Cannot parse parameter a as Int: For input string: \"foo\"");
        assert_eq!(err.param(), "a");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.render().as_deref(),
            Some("Cannot parse parameter a as Int: For input string: \"foo\"")
        );
    }

    #[test]
    #[should_panic(expected = "no route matched")]
    fn test_assert_handled_panics_on_no_match() {
        let response = response(Outcome::NoMatch);
        let _ = response.assert_handled();
    }
}
