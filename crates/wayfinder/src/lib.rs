//! # Wayfinder
//!
//! Declarative path routing and typed request dispatch.
//!
//! Routes are declared with a small DSL: a method, a path template, and a
//! handler taking zero to three typed parameters. The DSL compiles each
//! template, checks that the handler's parameters line up with the
//! template's captures, and freezes the result into an immutable
//! [`Router`]. The router resolves `(method, path)` pairs in registration
//! order and dispatches to the first route that accepts them.
//!
//! ## Quick Start
//!
//! ```rust
//! use wayfinder::RoutingDsl;
//!
//! # fn main() -> Result<(), wayfinder::CompileError> {
//! let router = RoutingDsl::new()
//!     .get("/hello/:to")
//!     .route_to(|to: String| format!("Hello {to}"))?
//!     .get("/users/:id/posts/$slug<[a-z-]+>")
//!     .route_to(|id: i64, slug: String| format!("post {slug} by {id}"))?
//!     .build();
//!
//! let hello = router.handle("GET", "/hello/dollar%24").unwrap().unwrap();
//! assert_eq!(hello.into_ready().unwrap(), "Hello dollar$");
//!
//! let err = router.handle("GET", "/users/me/posts/first").unwrap().unwrap_err();
//! assert_eq!(err.to_string(), "Cannot parse parameter id as Long: For input string: \"me\"");
//!
//! assert!(router.handle("GET", "/nowhere").is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Outcomes
//!
//! | Situation | When | Surfaces as |
//! |-----------|------|-------------|
//! | Bad template, arity mismatch, type without binder | registration | `Err(CompileError)` from `route_to` / `route_async` |
//! | No route accepts the request | request | `None` / [`MatchOutcome::NoMatch`] |
//! | A token does not convert to its parameter type | request | `Some(Err(BindError))` |
//! | Handler ran | request | `Some(Ok(Dispatch))` |
//!
//! ## Async Handlers
//!
//! Handlers registered with `route_async` return futures. Dispatching them
//! does not poll the future; the caller awaits the returned [`Dispatch`].
//!
//! ```rust
//! use wayfinder::RoutingDsl;
//!
//! # async fn run() -> Result<(), wayfinder::CompileError> {
//! let router = RoutingDsl::new()
//!     .get("/:say/:to")
//!     .route_async(|say: String, to: String| async move { format!("{say} {to}") })?
//!     .build();
//!
//! let dispatch = router.handle("GET", "/Hello/world").unwrap().unwrap();
//! assert!(dispatch.is_pending());
//! assert_eq!(dispatch.await, "Hello world");
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/wayfinder/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatch;
mod dsl;
mod handler;
mod route;
mod router;

pub use dispatch::Dispatch;
pub use dsl::{RouteBuilder, RoutingDsl};
pub use handler::{BoundCall, Handler, IntoAsyncHandler, IntoHandler, NullaryCall, ParamResolver};
pub use route::Route;
pub use router::{MatchOutcome, Router};

pub use http::Method;
pub use wayfinder_bind::{BindError, Binder, BinderRegistry, PathBindable, PathParam};
pub use wayfinder_router::{CompileError, CompiledPattern, RawTokens, Segment};

// Re-export the underlying crates
pub use wayfinder_bind as bind;
pub use wayfinder_router as router_core;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use wayfinder::prelude::*;
///
/// let router: Router<&str> = RoutingDsl::new().build();
/// assert!(router.is_empty());
/// ```
pub mod prelude {
    pub use crate::{
        BindError, BinderRegistry, CompileError, Dispatch, MatchOutcome, PathBindable, PathParam,
        Router, RoutingDsl,
    };
}
