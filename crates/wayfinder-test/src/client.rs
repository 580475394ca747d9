//! Test client for in-memory routing.

use http::Method;
use wayfinder::{MatchOutcome, Router};
use wayfinder_telemetry::LogConfig;

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::{Outcome, TestResponse};

/// A test client that resolves requests against a router.
///
/// Nothing is bound to a port: each request is matched, its parameters are
/// bound, and the handler's value is awaited in place.
///
/// # Example
///
/// ```rust
/// use wayfinder::RoutingDsl;
/// use wayfinder_test::TestClient;
///
/// # async fn run() -> Result<(), wayfinder::CompileError> {
/// let router = RoutingDsl::new()
///     .get("/hello/:to")
///     .route_to(|to: String| format!("Hello {to}"))?
///     .build();
///
/// let client = TestClient::new(router);
/// let response = client.get("/hello/world").send().await;
/// assert_eq!(response.assert_handled(), "Hello world");
///
/// client.post("/hello/world").send().await.assert_no_match();
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct TestClient<R> {
    router: Router<R>,
}

impl<R: Send + 'static> TestClient<R> {
    /// Creates a new test client around a router.
    pub fn new(router: Router<R>) -> Self {
        Self { router }
    }

    /// Installs the test-harness log subscriber so routing events show up in
    /// failing test output.
    ///
    /// Only the first call in a process installs anything; later calls are
    /// no-ops.
    pub fn with_logging(self) -> Self {
        let _ = wayfinder_telemetry::init_logging(&LogConfig::testing());
        self
    }

    /// Returns the router under test.
    pub fn router(&self) -> &Router<R> {
        &self.router
    }

    /// Creates a GET request builder.
    pub fn get(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::get(target))
    }

    /// Creates a POST request builder.
    pub fn post(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::post(target))
    }

    /// Creates a PUT request builder.
    pub fn put(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::put(target))
    }

    /// Creates a PATCH request builder.
    pub fn patch(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::patch(target))
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::delete(target))
    }

    /// Creates an OPTIONS request builder.
    pub fn options(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::options(target))
    }

    /// Creates a HEAD request builder.
    pub fn head(&self, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequest::head(target))
    }

    /// Creates a request builder with a custom method.
    pub fn request(&self, method: Method, target: impl AsRef<str>) -> TestClientRequest<'_, R> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, target))
    }

    async fn send_internal(&self, request: TestRequest) -> TestResponse<R> {
        let TestRequest { method, path, .. } = request;

        // Nothing borrowed from the router may live across the await.
        let matched = self.router.match_route(method.as_str(), &path);
        let (template, is_async, dispatched) = match matched {
            MatchOutcome::NoMatch => {
                return TestResponse::new(method, path, None, false, Outcome::NoMatch);
            }
            MatchOutcome::Matched { route, tokens } => (
                route.template().to_string(),
                route.is_async(),
                route.dispatch(&tokens),
            ),
        };

        let outcome = match dispatched {
            Ok(dispatch) => Outcome::Handled(dispatch.await),
            Err(err) => Outcome::BindError(err),
        };
        TestResponse::new(method, path, Some(template), is_async, outcome)
    }
}

/// A request builder bound to a test client.
pub struct TestClientRequest<'a, R> {
    client: &'a TestClient<R>,
    builder: TestRequestBuilder,
}

impl<'a, R: Send + 'static> TestClientRequest<'a, R> {
    fn new(client: &'a TestClient<R>, builder: TestRequestBuilder) -> Self {
        Self { client, builder }
    }

    /// Appends one percent-encoded path segment.
    #[must_use]
    pub fn segment(mut self, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.segment(value);
        self
    }

    /// Appends a percent-encoded query parameter.
    #[must_use]
    pub fn query(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Sends the request and returns the response.
    ///
    /// # Panics
    ///
    /// Panics if the request target is invalid.
    pub async fn send(self) -> TestResponse<R> {
        let request = self.builder.build().expect("valid request");
        self.client.send_internal(request).await
    }

    /// Sends the request and returns a Result.
    pub async fn try_send(self) -> Result<TestResponse<R>, TestError> {
        let request = self.builder.build()?;
        Ok(self.client.send_internal(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use wayfinder::RoutingDsl;

    fn client() -> TestClient<String> {
        let router = RoutingDsl::new()
            .get("/hello/:to")
            .route_to(|to: String| format!("Hello {to}"))
            .unwrap()
            .get("/:a/:b")
            .route_async(|a: i32, b: String| async move { format!("int {a} string {b}") })
            .unwrap()
            .build();
        TestClient::new(router)
    }

    #[tokio::test]
    async fn test_sync_route() {
        let client = client();
        let response = client.get("/hello/world").send().await;

        assert_eq!(response.assert_handled(), "Hello world");
        assert_eq!(response.template(), Some("/hello/:to"));
        assert!(!response.was_async());
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_async_route_is_awaited() {
        let client = client();
        let response = client.get("/20/foo").send().await;

        assert_eq!(response.assert_handled(), "int 20 string foo");
        assert!(response.was_async());
    }

    #[tokio::test]
    async fn test_segment_is_decoded_by_router() {
        let client = client();
        let response = client.get("/hello").segment("dollar$").send().await;

        assert_eq!(response.path(), "/hello/dollar%24");
        assert_eq!(response.assert_handled(), "Hello dollar$");
    }

    #[tokio::test]
    async fn test_bind_error() {
        let client = client();
        let response = client.get("/foo/bar").send().await;

        response.assert_bind_error("Cannot parse parameter a as Int: For input string: \"foo\"");
        assert_eq!(response.template(), Some("/:a/:b"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_query_does_not_affect_matching() {
        let client = client();
        let response = client.get("/hello/world").query("lang", "en").send().await;
        assert_eq!(response.assert_handled(), "Hello world");
    }

    #[tokio::test]
    async fn test_all_methods_miss_get_only_routes() {
        let client = client();

        client.post("/hello/world").send().await.assert_no_match();
        client.put("/hello/world").send().await.assert_no_match();
        client.patch("/hello/world").send().await.assert_no_match();
        client.delete("/hello/world").send().await.assert_no_match();
        client.options("/hello/world").send().await.assert_no_match();
        client.head("/hello/world").send().await.assert_no_match();
    }

    #[tokio::test]
    async fn test_try_send_invalid_target() {
        let client = client();
        let result = client.get("no-slash").try_send().await;
        assert!(matches!(result, Err(TestError::InvalidTarget(_))));
    }

    #[test]
    fn test_send_outside_async_test() {
        let client = client();
        let response = tokio_test::block_on(client.get("/hello/there").send());
        assert_eq!(response.assert_handled(), "Hello there");
    }

    #[tokio::test]
    async fn test_custom_method() {
        let router = RoutingDsl::new()
            .route(Method::from_bytes(b"PURGE").unwrap(), "/cache")
            .route_to(|| "purged".to_string())
            .unwrap()
            .build();
        let client = TestClient::new(router).with_logging();

        let method = Method::from_bytes(b"PURGE").unwrap();
        let response = client.request(method, "/cache").send().await;
        assert_eq!(response.assert_handled(), "purged");

        client.get("/cache").send().await.assert_no_match();
    }
}
