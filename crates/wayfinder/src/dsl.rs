//! The registration DSL.

use std::fmt;

use http::Method;
use wayfinder_bind::BinderRegistry;
use wayfinder_router::{CompileError, CompiledPattern};

use crate::handler::{Handler, IntoAsyncHandler, IntoHandler, ParamResolver};
use crate::route::Route;
use crate::router::Router;

/// Builder for a [`Router`].
///
/// Each verb method starts a [`RouteBuilder`] for one template; attaching a
/// handler validates the route and hands the DSL back. Validation is
/// immediate: a malformed template, a capture count that differs from the
/// handler's parameter count, or a parameter type without a binder fails
/// the registration call itself with a [`CompileError`].
///
/// # Example
///
/// ```rust
/// use wayfinder::RoutingDsl;
///
/// # fn main() -> Result<(), wayfinder::CompileError> {
/// let router = RoutingDsl::new()
///     .get("/:a/:b/:c")
///     .route_to(|a: i32, b: bool, c: String| format!("int {a} boolean {b} string {c}"))?
///     .build();
///
/// let result = router.handle("GET", "/20/true/foo").unwrap().unwrap();
/// assert_eq!(result.into_ready().unwrap(), "int 20 boolean true string foo");
/// # Ok(())
/// # }
/// ```
///
/// A wrong parameter count is rejected at registration:
///
/// ```rust
/// use wayfinder::{CompileError, RoutingDsl};
///
/// let err = RoutingDsl::new()
///     .get("/:a/:b")
///     .route_to(|a: String| a)
///     .unwrap_err();
///
/// assert!(matches!(err, CompileError::ArityMismatch { captures: 2, params: 1, .. }));
/// ```
pub struct RoutingDsl<R> {
    registry: BinderRegistry,
    routes: Vec<Route<R>>,
}

impl<R> fmt::Debug for RoutingDsl<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingDsl")
            .field("registry", &self.registry)
            .field("routes", &self.routes)
            .finish()
    }
}

impl<R> Default for RoutingDsl<R> {
    fn default() -> Self {
        Self::with_registry(BinderRegistry::new())
    }
}

impl<R> RoutingDsl<R> {
    /// Creates a DSL using the built-in binders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DSL resolving parameter types against `registry`.
    #[must_use]
    pub fn with_registry(registry: BinderRegistry) -> Self {
        Self {
            registry,
            routes: Vec::new(),
        }
    }

    /// Returns the binder registry.
    #[must_use]
    pub fn registry(&self) -> &BinderRegistry {
        &self.registry
    }

    /// Starts a `GET` route.
    pub fn get(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::GET, template)
    }

    /// Starts a `HEAD` route.
    pub fn head(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::HEAD, template)
    }

    /// Starts a `POST` route.
    pub fn post(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::POST, template)
    }

    /// Starts a `PUT` route.
    pub fn put(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::PUT, template)
    }

    /// Starts a `DELETE` route.
    pub fn delete(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::DELETE, template)
    }

    /// Starts a `PATCH` route.
    pub fn patch(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::PATCH, template)
    }

    /// Starts an `OPTIONS` route.
    pub fn options(self, template: impl Into<String>) -> RouteBuilder<R> {
        self.route(Method::OPTIONS, template)
    }

    /// Starts a route for any method, including extension methods.
    pub fn route(self, method: Method, template: impl Into<String>) -> RouteBuilder<R> {
        RouteBuilder {
            dsl: self,
            method,
            template: template.into(),
        }
    }

    /// Returns the number of routes registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Freezes the registered routes into a [`Router`].
    #[must_use]
    pub fn build(self) -> Router<R> {
        tracing::debug!(routes = self.routes.len(), "built router");
        Router::new(self.routes)
    }
}

/// A route waiting for its handler.
#[must_use = "a route is only registered once a handler is attached"]
pub struct RouteBuilder<R> {
    dsl: RoutingDsl<R>,
    method: Method,
    template: String,
}

impl<R> RouteBuilder<R> {
    /// Attaches a synchronous handler.
    pub fn route_to<Args, H>(self, handler: H) -> Result<RoutingDsl<R>, CompileError>
    where
        H: IntoHandler<Args, R>,
    {
        self.attach(<H as IntoHandler<Args, R>>::param_types(), false, |resolver| {
            <H as IntoHandler<Args, R>>::into_handler(handler, resolver)
        })
    }

    /// Attaches a handler that returns a future.
    ///
    /// Dispatching the route returns the handler's future without polling
    /// it.
    pub fn route_async<Args, H>(self, handler: H) -> Result<RoutingDsl<R>, CompileError>
    where
        H: IntoAsyncHandler<Args, R>,
    {
        self.attach(<H as IntoAsyncHandler<Args, R>>::param_types(), true, |resolver| {
            <H as IntoAsyncHandler<Args, R>>::into_handler(handler, resolver)
        })
    }

    fn attach(
        self,
        param_types: Vec<&'static str>,
        is_async: bool,
        make: impl FnOnce(&ParamResolver<'_>) -> Result<Handler<R>, CompileError>,
    ) -> Result<RoutingDsl<R>, CompileError> {
        let Self {
            mut dsl,
            method,
            template,
        } = self;

        let pattern = CompiledPattern::compile(&template)?;
        if pattern.capture_count() != param_types.len() {
            return Err(CompileError::ArityMismatch {
                template,
                captures: pattern.capture_count(),
                params: param_types.len(),
            });
        }

        let handler = make(&ParamResolver::new(&dsl.registry, &pattern))?;

        tracing::debug!(
            http.method = method.as_str(),
            route.template = template.as_str(),
            arity = param_types.len(),
            is_async,
            "registered route"
        );
        dsl.routes
            .push(Route::new(method, pattern, param_types, handler, is_async));
        Ok(dsl)
    }
}

#[cfg(test)]
mod tests {
    use wayfinder_bind::{PathBindable, PathParam};

    use super::*;

    #[derive(Debug)]
    struct MyString(String);

    impl PathBindable for MyString {
        fn bind(param: &str, token: &str) -> Result<Self, String> {
            Ok(MyString(format!("{param}:{token}")))
        }
    }

    struct NoBinder;

    impl PathParam for NoBinder {
        fn type_name() -> &'static str {
            "NoBinder"
        }
    }

    #[test]
    fn test_routes_accumulate_in_order() {
        let dsl = RoutingDsl::new()
            .get("/a")
            .route_to(|| "a")
            .unwrap()
            .post("/b")
            .route_to(|| "b")
            .unwrap();
        assert_eq!(dsl.len(), 2);

        let router = dsl.build();
        let templates: Vec<_> = router.routes().map(|r| r.template().to_string()).collect();
        assert_eq!(templates, vec!["/a", "/b"]);
    }

    #[test]
    fn test_every_verb() {
        let router = RoutingDsl::new()
            .get("/r")
            .route_to(|| "get")
            .unwrap()
            .head("/r")
            .route_to(|| "head")
            .unwrap()
            .post("/r")
            .route_to(|| "post")
            .unwrap()
            .put("/r")
            .route_to(|| "put")
            .unwrap()
            .delete("/r")
            .route_to(|| "delete")
            .unwrap()
            .patch("/r")
            .route_to(|| "patch")
            .unwrap()
            .options("/r")
            .route_to(|| "options")
            .unwrap()
            .route(Method::TRACE, "/r")
            .route_to(|| "trace")
            .unwrap()
            .build();

        for (method, expected) in [
            ("GET", "get"),
            ("HEAD", "head"),
            ("POST", "post"),
            ("PUT", "put"),
            ("DELETE", "delete"),
            ("PATCH", "patch"),
            ("OPTIONS", "options"),
            ("TRACE", "trace"),
        ] {
            let result = router.handle(method, "/r").unwrap().unwrap();
            assert_eq!(result.into_ready(), Some(expected));
        }
    }

    #[test]
    fn test_extension_method() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let router = RoutingDsl::new()
            .route(purge, "/cache/*key")
            .route_to(|key: String| key)
            .unwrap()
            .build();

        let result = router.handle("PURGE", "/cache/a/b").unwrap().unwrap();
        assert_eq!(result.into_ready().unwrap(), "a/b");
    }

    #[test]
    fn test_arity_mismatch_fails_registration() {
        let err = RoutingDsl::new()
            .get("/:a/:b")
            .route_to(|a: String| a)
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::ArityMismatch {
                captures: 2,
                params: 1,
                ..
            }
        ));
        assert!(!err.is_template_error());

        let err = RoutingDsl::new()
            .get("/")
            .route_to(|a: String| a)
            .unwrap_err();
        assert!(matches!(err, CompileError::ArityMismatch { captures: 0, params: 1, .. }));
    }

    #[test]
    fn test_unsupported_type_fails_registration() {
        let err = RoutingDsl::new()
            .get("/:thing")
            .route_to(|_thing: NoBinder| "x")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'thing' of path template '/:thing' has unsupported type NoBinder: no binder registered"
        );
    }

    #[test]
    fn test_empty_registry_rejects_scalars() {
        let err = RoutingDsl::with_registry(BinderRegistry::empty())
            .get("/:n")
            .route_to(|n: i32| n)
            .unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedParamType { .. }));
    }

    #[test]
    fn test_template_errors_surface_from_registration() {
        let err = RoutingDsl::new()
            .get("/*rest/more")
            .route_to(|rest: String| rest)
            .unwrap_err();
        assert!(err.is_template_error());
        assert_eq!(err.template(), "/*rest/more");
    }

    #[test]
    fn test_capability_type_needs_no_registration() {
        let router = RoutingDsl::new()
            .get("/:a")
            .route_to(|a: MyString| a.0)
            .unwrap()
            .build();

        let result = router.handle("GET", "/foo").unwrap().unwrap();
        assert_eq!(result.into_ready().unwrap(), "a:foo");
    }

    #[test]
    fn test_custom_registry_binder() {
        let mut registry = BinderRegistry::new();
        registry.register::<NoBinder>(|token| {
            if token == "ok" {
                Ok(NoBinder)
            } else {
                Err("expected ok".to_string())
            }
        });

        let router = RoutingDsl::with_registry(registry)
            .get("/:thing")
            .route_to(|_thing: NoBinder| "bound")
            .unwrap()
            .build();

        assert_eq!(
            router.handle("GET", "/ok").unwrap().unwrap().into_ready(),
            Some("bound")
        );
        assert_eq!(
            router.handle("GET", "/no").unwrap().unwrap_err().to_string(),
            "Cannot parse parameter thing as NoBinder: expected ok"
        );
    }

    #[tokio::test]
    async fn test_async_routes_return_pending_futures() {
        let router = RoutingDsl::new()
            .get("/:say/:to/:extra")
            .route_async(|say: String, to: String, extra: String| async move {
                format!("{say} {to}{extra}")
            })
            .unwrap()
            .build();

        let dispatch = router.handle("GET", "/Hello/world/!").unwrap().unwrap();
        assert!(dispatch.is_pending());
        assert_eq!(dispatch.await, "Hello world!");

        assert!(router.handle("GET", "/foo/bar").is_none());
    }

    #[test]
    fn test_failed_registration_is_reported_at_the_call() {
        let result = RoutingDsl::new()
            .get("/ok")
            .route_to(|| "ok")
            .and_then(|dsl| {
                dsl.get("/$x<(>")
                    .route_to(|x: String| if x.is_empty() { "a" } else { "b" })
            });

        match result {
            Err(CompileError::InvalidRegex { name, .. }) => assert_eq!(name, "x"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("registration should fail"),
        }
    }
}
