//! The dispatcher and its results.
//!
//! Dispatching binds a matched route's tokens to the handler's declared
//! parameter types and invokes the handler. A [`BindError`] on any
//! parameter aborts before the handler runs and before later parameters
//! are bound.

use std::fmt;
use std::future::IntoFuture;

use futures_util::future::{self, BoxFuture};
use wayfinder_bind::BindError;
use wayfinder_router::RawTokens;

use crate::handler::Handler;
use crate::route::Route;

/// The value produced by invoking a handler.
///
/// Synchronous handlers produce [`Dispatch::Ready`]; asynchronous handlers
/// produce [`Dispatch::Pending`] without being polled. Either form can be
/// awaited.
///
/// # Example
///
/// ```rust
/// use wayfinder::Dispatch;
///
/// let ready = Dispatch::Ready("done");
/// assert!(!ready.is_pending());
/// assert_eq!(ready.into_ready(), Some("done"));
/// ```
pub enum Dispatch<R> {
    /// The handler ran to completion.
    Ready(R),
    /// The handler's future, not yet polled.
    Pending(BoxFuture<'static, R>),
}

impl<R> Dispatch<R> {
    /// Returns true if the result is still a pending future.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the value of a synchronous handler, or `None` for a pending
    /// future.
    #[must_use]
    pub fn into_ready(self) -> Option<R> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }
}

impl<R: Send + 'static> IntoFuture for Dispatch<R> {
    type Output = R;
    type IntoFuture = BoxFuture<'static, R>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(value) => Box::pin(future::ready(value)),
            Self::Pending(fut) => fut,
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Dispatch<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

pub(crate) fn invoke<R>(route: &Route<R>, tokens: &RawTokens) -> Result<Dispatch<R>, BindError> {
    let result = match route.handler() {
        Handler::Zero(call) => Ok(call()),
        Handler::One(call) | Handler::Two(call) | Handler::Three(call) => call(tokens),
    };

    result.map_err(|err| {
        tracing::debug!(
            route.template = route.template(),
            param.name = err.param(),
            param.type_name = err.type_name(),
            cause = err.cause(),
            "failed to bind path parameter"
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_can_be_awaited() {
        let dispatch = Dispatch::Ready(42);
        assert_eq!(dispatch.await, 42);
    }

    #[tokio::test]
    async fn test_pending_resolves_when_awaited() {
        let dispatch: Dispatch<String> = Dispatch::Pending(Box::pin(async { "later".to_string() }));
        assert!(dispatch.is_pending());
        assert_eq!(dispatch.await, "later");
    }

    #[test]
    fn test_into_ready() {
        assert_eq!(Dispatch::Ready(1).into_ready(), Some(1));

        let pending: Dispatch<i32> = Dispatch::Pending(Box::pin(async { 1 }));
        assert_eq!(pending.into_ready(), None);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Dispatch::Ready("x")), "Ready(\"x\")");

        let pending: Dispatch<i32> = Dispatch::Pending(Box::pin(async { 1 }));
        assert_eq!(format!("{pending:?}"), "Pending(..)");
    }
}
