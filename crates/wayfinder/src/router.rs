//! The immutable route table.

use std::fmt;
use std::sync::Arc;

use wayfinder_bind::BindError;
use wayfinder_router::RawTokens;

use crate::dispatch::Dispatch;
use crate::route::Route;

/// The result of resolving a (method, path) pair.
pub enum MatchOutcome<'r, R> {
    /// No route accepts the request.
    NoMatch,
    /// The first route, in registration order, that accepts the request.
    Matched {
        /// The matching route.
        route: &'r Route<R>,
        /// Tokens captured from the path, in template order.
        tokens: RawTokens,
    },
}

impl<'r, R> MatchOutcome<'r, R> {
    /// Returns true if a route matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Returns the matching route.
    #[must_use]
    pub fn route(&self) -> Option<&'r Route<R>> {
        match self {
            Self::Matched { route, .. } => Some(route),
            Self::NoMatch => None,
        }
    }

    /// Returns the captured tokens.
    #[must_use]
    pub fn tokens(&self) -> Option<&RawTokens> {
        match self {
            Self::Matched { tokens, .. } => Some(tokens),
            Self::NoMatch => None,
        }
    }

    /// Binds the captured tokens and invokes the matched handler.
    ///
    /// Returns `None` for [`MatchOutcome::NoMatch`].
    pub fn dispatch(self) -> Option<Result<Dispatch<R>, BindError>> {
        match self {
            Self::Matched { route, tokens } => Some(route.dispatch(&tokens)),
            Self::NoMatch => None,
        }
    }
}

impl<R> fmt::Debug for MatchOutcome<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => f.write_str("NoMatch"),
            Self::Matched { route, tokens } => f
                .debug_struct("Matched")
                .field("route", route)
                .field("tokens", tokens)
                .finish(),
        }
    }
}

/// An ordered, immutable table of routes.
///
/// Built by [`RoutingDsl::build`](crate::RoutingDsl::build). Requests are
/// resolved by scanning the routes in registration order; the first route
/// whose method and pattern both accept the request wins. There is no
/// specificity ranking, so a catch-all registered early shadows everything
/// after it.
///
/// Cloning a router is cheap and shares the routes. A router is never
/// modified after it is built; `with_prefix` returns a new one.
///
/// # Example
///
/// ```rust
/// use wayfinder::RoutingDsl;
///
/// # fn main() -> Result<(), wayfinder::CompileError> {
/// let router = RoutingDsl::new()
///     .get("/hello/:to")
///     .route_to(|to: String| format!("Hello {to}"))?
///     .get("/*path")
///     .route_to(|path: String| format!("Fallback {path}"))?
///     .build();
///
/// let result = router.handle("GET", "/hello/world").unwrap().unwrap();
/// assert_eq!(result.into_ready().unwrap(), "Hello world");
///
/// assert!(router.handle("POST", "/hello/world").is_none());
/// # Ok(())
/// # }
/// ```
pub struct Router<R> {
    routes: Arc<[Route<R>]>,
    prefix: String,
}

impl<R> Router<R> {
    pub(crate) fn new(routes: Vec<Route<R>>) -> Self {
        Self {
            routes: routes.into(),
            prefix: String::new(),
        }
    }

    /// Resolves a request to the first matching route.
    ///
    /// `path` is the raw, still percent-encoded request path without a
    /// query string.
    #[must_use]
    pub fn match_route(&self, method: &str, path: &str) -> MatchOutcome<'_, R> {
        let Some(path) = self.strip_prefix(path) else {
            tracing::trace!(http.method = method, http.path = path, "path outside router prefix");
            return MatchOutcome::NoMatch;
        };

        for (index, route) in self.routes.iter().enumerate() {
            if let Some(tokens) = route.matches(method, path) {
                tracing::trace!(
                    http.method = method,
                    http.path = path,
                    route.index = index,
                    route.template = route.template(),
                    "matched route"
                );
                return MatchOutcome::Matched { route, tokens };
            }
        }

        tracing::trace!(http.method = method, http.path = path, "no route matched");
        MatchOutcome::NoMatch
    }

    /// Resolves and dispatches a request in one step.
    ///
    /// `None` means no route matched; `Some(Err(_))` means a route matched
    /// but a parameter failed to bind.
    pub fn handle(&self, method: &str, path: &str) -> Option<Result<Dispatch<R>, BindError>> {
        self.match_route(method, path).dispatch()
    }

    /// Returns a router that serves the same routes beneath `prefix`.
    ///
    /// A request path must start with the prefix; the remainder is matched
    /// against the routes, with an empty remainder treated as `/`. Prefixes
    /// nest. A trailing `/` on the prefix is ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wayfinder::RoutingDsl;
    ///
    /// # fn main() -> Result<(), wayfinder::CompileError> {
    /// let router = RoutingDsl::new()
    ///     .get("/")
    ///     .route_to(|| "index")?
    ///     .get("/users/:id")
    ///     .route_to(|id: i64| if id > 0 { "user" } else { "nobody" })?
    ///     .build()
    ///     .with_prefix("/api");
    ///
    /// assert!(router.match_route("GET", "/api").is_match());
    /// assert!(router.match_route("GET", "/api/users/7").is_match());
    /// assert!(!router.match_route("GET", "/users/7").is_match());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let trimmed = prefix.trim_end_matches('/');
        let mut combined = self.prefix.clone();
        if !trimmed.is_empty() {
            if !trimmed.starts_with('/') {
                combined.push('/');
            }
            combined.push_str(trimmed);
        }

        Self {
            routes: Arc::clone(&self.routes),
            prefix: combined,
        }
    }

    /// Returns the prefix this router serves under, or `""`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Iterates over the routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<R>> {
        self.routes.iter()
    }

    /// Lists `(method, path, handler)` for every route in registration
    /// order, with the prefix applied to each path.
    #[must_use]
    pub fn documentation(&self) -> Vec<(String, String, String)> {
        self.routes
            .iter()
            .map(|route| {
                let path = match (self.prefix.is_empty(), route.template()) {
                    (false, "/") => self.prefix.clone(),
                    (_, template) => format!("{}{template}", self.prefix),
                };
                (route.method().to_string(), path, route.describe())
            })
            .collect()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the router has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn strip_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.prefix.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(self.prefix.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }
}

impl<R> Clone for Router<R> {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            prefix: self.prefix.clone(),
        }
    }
}

impl<R> fmt::Debug for Router<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("routes", &self.routes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use wayfinder_bind::BinderRegistry;

    use super::*;
    use crate::RoutingDsl;

    fn ready(router: &Router<String>, method: &str, path: &str) -> Option<String> {
        router
            .handle(method, path)
            .map(|result| result.unwrap().into_ready().unwrap())
    }

    #[test]
    fn test_empty_router() {
        let router: Router<String> = RoutingDsl::new().build();
        assert!(router.is_empty());
        assert_eq!(router.len(), 0);
        assert!(!router.match_route("GET", "/").is_match());
    }

    #[test]
    fn test_first_registered_route_wins() {
        let router = RoutingDsl::new()
            .get("/hello/:to")
            .route_to(|to: String| format!("first {to}"))
            .unwrap()
            .get("/*path")
            .route_to(|path: String| format!("catch-all {path}"))
            .unwrap()
            .build();

        assert_eq!(ready(&router, "GET", "/hello/world").unwrap(), "first world");
        assert_eq!(ready(&router, "GET", "/other/place").unwrap(), "catch-all other/place");
    }

    #[test]
    fn test_catch_all_registered_first_shadows_later_routes() {
        let router = RoutingDsl::new()
            .get("/*path")
            .route_to(|path: String| format!("catch-all {path}"))
            .unwrap()
            .get("/hello/:to")
            .route_to(|to: String| format!("never {to}"))
            .unwrap()
            .build();

        assert_eq!(ready(&router, "GET", "/hello/world").unwrap(), "catch-all hello/world");
    }

    #[test]
    fn test_method_must_match_exactly() {
        let router = RoutingDsl::new()
            .get("/hello/:to")
            .route_to(|to: String| to)
            .unwrap()
            .build();

        assert!(router.match_route("GET", "/hello/world").is_match());
        assert!(!router.match_route("POST", "/hello/world").is_match());
        assert!(!router.match_route("get", "/hello/world").is_match());
        assert!(!router.match_route("HEAD", "/hello/world").is_match());
    }

    #[test]
    fn test_same_template_different_methods() {
        let router = RoutingDsl::new()
            .get("/items/:id")
            .route_to(|id: i64| format!("get {id}"))
            .unwrap()
            .delete("/items/:id")
            .route_to(|id: i64| format!("delete {id}"))
            .unwrap()
            .build();

        assert_eq!(ready(&router, "GET", "/items/3").unwrap(), "get 3");
        assert_eq!(ready(&router, "DELETE", "/items/3").unwrap(), "delete 3");
    }

    #[test]
    fn test_match_outcome_exposes_route_and_tokens() {
        let router = RoutingDsl::new()
            .put("/:say/:to")
            .route_to(|say: String, to: String| format!("{say} {to}"))
            .unwrap()
            .build();

        let outcome = router.match_route("PUT", "/Hello/w%6Frld");
        let route = outcome.route().unwrap();
        assert_eq!(route.template(), "/:say/:to");
        assert_eq!(route.arity(), 2);
        assert_eq!(outcome.tokens().unwrap().get("to"), Some("world"));

        let result = outcome.dispatch().unwrap().unwrap();
        assert_eq!(result.into_ready().unwrap(), "Hello world");
    }

    #[test]
    fn test_bind_error_is_a_value() {
        let router = RoutingDsl::new()
            .get("/:a")
            .route_to(|a: i32| a.to_string())
            .unwrap()
            .build();

        let err = router.handle("GET", "/foo").unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Cannot parse parameter a as Int: For input string: \"foo\"");
    }

    #[test]
    fn test_bind_error_stops_later_binders() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        struct Counted;

        impl wayfinder_bind::PathParam for Counted {
            fn type_name() -> &'static str {
                "Counted"
            }
        }

        let mut registry = BinderRegistry::new();
        registry.register::<Counted>(|_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(Counted)
        });

        let router = RoutingDsl::with_registry(registry)
            .get("/:a/:b")
            .route_to(|a: i32, _b: Counted| a.to_string())
            .unwrap()
            .build();

        assert!(router.handle("GET", "/x/y").unwrap().is_err());
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        assert_eq!(ready(&router, "GET", "/1/y").unwrap(), "1");
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_prefix() {
        let router = RoutingDsl::new()
            .get("/")
            .route_to(|| "index".to_string())
            .unwrap()
            .get("/users/:id")
            .route_to(|id: i64| format!("user {id}"))
            .unwrap()
            .build();
        let api = router.with_prefix("/api/");

        assert_eq!(api.prefix(), "/api");
        assert_eq!(ready(&api, "GET", "/api").unwrap(), "index");
        assert_eq!(ready(&api, "GET", "/api/").unwrap(), "index");
        assert_eq!(ready(&api, "GET", "/api/users/5").unwrap(), "user 5");
        assert!(ready(&api, "GET", "/users/5").is_none());
        assert!(ready(&api, "GET", "/apiusers/5").is_none());

        // The original router is untouched.
        assert_eq!(ready(&router, "GET", "/users/5").unwrap(), "user 5");
    }

    #[test]
    fn test_prefixes_nest() {
        let router = RoutingDsl::new()
            .get("/ping")
            .route_to(|| "pong".to_string())
            .unwrap()
            .build()
            .with_prefix("/api")
            .with_prefix("v1");

        assert_eq!(router.prefix(), "/api/v1");
        assert_eq!(ready(&router, "GET", "/api/v1/ping").unwrap(), "pong");
        assert!(ready(&router, "GET", "/api/ping").is_none());
    }

    #[test]
    fn test_documentation() {
        let router = RoutingDsl::new()
            .get("/")
            .route_to(|| String::new())
            .unwrap()
            .post("/:a/:b")
            .route_async(|a: i32, b: String| async move { format!("{a}{b}") })
            .unwrap()
            .build();

        assert_eq!(
            router.documentation(),
            vec![
                ("GET".to_string(), "/".to_string(), "sync handler()".to_string()),
                (
                    "POST".to_string(),
                    "/:a/:b".to_string(),
                    "async handler(Int, String)".to_string()
                ),
            ]
        );

        let docs = router.with_prefix("/api").documentation();
        assert_eq!(docs[0].1, "/api");
        assert_eq!(docs[1].1, "/api/:a/:b");
    }

    #[test]
    fn test_router_is_shareable_across_threads() {
        let router = RoutingDsl::new()
            .get("/n/:n")
            .route_to(|n: i32| (n * 2).to_string())
            .unwrap()
            .build();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let router = router.clone();
                std::thread::spawn(move || ready(&router, "GET", &format!("/n/{i}")))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            results,
            vec![
                Some("0".to_string()),
                Some("2".to_string()),
                Some("4".to_string()),
                Some("6".to_string())
            ]
        );
    }
}
