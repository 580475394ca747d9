//! Registered routes.

use std::fmt;

use http::Method;
use wayfinder_bind::BindError;
use wayfinder_router::{CompiledPattern, RawTokens};

use crate::dispatch::{self, Dispatch};
use crate::handler::Handler;

/// One registered (method, template, handler) entry.
///
/// Routes are created by the [`RoutingDsl`](crate::RoutingDsl), which has
/// already checked that the template's capture count equals the handler's
/// arity and that every parameter type has a binder.
pub struct Route<R> {
    method: Method,
    pattern: CompiledPattern,
    param_types: Vec<&'static str>,
    handler: Handler<R>,
    is_async: bool,
}

impl<R> Route<R> {
    pub(crate) fn new(
        method: Method,
        pattern: CompiledPattern,
        param_types: Vec<&'static str>,
        handler: Handler<R>,
        is_async: bool,
    ) -> Self {
        Self {
            method,
            pattern,
            param_types,
            handler,
            is_async,
        }
    }

    /// Returns the route's method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path template the route was declared with.
    #[must_use]
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Returns the declared parameter type names, in order.
    #[must_use]
    pub fn param_types(&self) -> &[&'static str] {
        &self.param_types
    }

    /// Returns the number of handler parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.handler.arity()
    }

    /// Returns true if the handler returns a future.
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &Handler<R> {
        &self.handler
    }

    /// Matches a request against this route alone.
    ///
    /// The method is compared byte for byte; `get` does not match `GET`.
    #[must_use]
    pub fn matches(&self, method: &str, path: &str) -> Option<RawTokens> {
        if self.method.as_str() != method {
            return None;
        }
        self.pattern.matches(path)
    }

    /// Binds `tokens` and invokes the handler.
    pub fn dispatch(&self, tokens: &RawTokens) -> Result<Dispatch<R>, BindError> {
        dispatch::invoke(self, tokens)
    }

    /// Describes the handler, e.g. `sync handler(Int, String)`.
    #[must_use]
    pub fn describe(&self) -> String {
        let kind = if self.is_async { "async" } else { "sync" };
        format!("{kind} handler({})", self.param_types.join(", "))
    }
}

impl<R> fmt::Debug for Route<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template())
            .field("param_types", &self.param_types)
            .field("is_async", &self.is_async)
            .finish_non_exhaustive()
    }
}
