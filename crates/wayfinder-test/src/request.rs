//! Test request building.

use http::{Method, Uri};

use crate::error::TestError;

/// A request ready to be resolved against a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRequest {
    /// Request method.
    pub method: Method,
    /// Raw request path, still percent-encoded, without the query string.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
}

impl TestRequest {
    /// Creates a new GET request.
    pub fn get(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, target)
    }

    /// Creates a new POST request.
    pub fn post(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, target)
    }

    /// Creates a new PUT request.
    pub fn put(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, target)
    }

    /// Creates a new PATCH request.
    pub fn patch(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, target)
    }

    /// Creates a new DELETE request.
    pub fn delete(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, target)
    }

    /// Creates a new OPTIONS request.
    pub fn options(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::OPTIONS, target)
    }

    /// Creates a new HEAD request.
    pub fn head(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::HEAD, target)
    }
}

/// Builder for test requests.
///
/// The target is kept exactly as written, so percent-escapes reach the
/// router untouched. [`segment`](Self::segment) appends an encoded path
/// segment and [`query`](Self::query) an encoded query pair.
///
/// # Example
///
/// ```rust
/// use wayfinder_test::TestRequest;
///
/// let request = TestRequest::get("/files")
///     .segment("report 2024.pdf")
///     .query("download", "true")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path, "/files/report%202024.pdf");
/// assert_eq!(request.query.as_deref(), Some("download=true"));
/// ```
#[derive(Debug, Clone)]
pub struct TestRequestBuilder {
    method: Method,
    target: String,
    query: Vec<(String, String)>,
}

impl TestRequestBuilder {
    /// Creates a new request builder.
    pub fn new(method: Method, target: impl AsRef<str>) -> Self {
        Self {
            method,
            target: target.as_ref().to_string(),
            query: Vec::new(),
        }
    }

    /// Creates a builder from a method string, which may be an extension
    /// method such as `PURGE`.
    pub fn from_method_str(method: &str, target: impl AsRef<str>) -> Result<Self, TestError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TestError::InvalidMethod(method.to_string()))?;
        Ok(Self::new(method, target))
    }

    /// Appends one percent-encoded path segment.
    pub fn segment(mut self, value: impl AsRef<str>) -> Self {
        if !self.target.ends_with('/') {
            self.target.push('/');
        }
        self.target.push_str(&urlencoding::encode(value.as_ref()));
        self
    }

    /// Appends a percent-encoded query parameter.
    pub fn query(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.query
            .push((key.as_ref().to_string(), value.as_ref().to_string()));
        self
    }

    /// Builds the request.
    ///
    /// Fails if the target is not an origin-form URI (`/path?query`).
    pub fn build(self) -> Result<TestRequest, TestError> {
        let mut target = self.target;
        if !self.query.is_empty() {
            let encoded: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            target.push(if target.contains('?') { '&' } else { '?' });
            target.push_str(&encoded.join("&"));
        }

        if !target.starts_with('/') {
            return Err(TestError::InvalidTarget(target));
        }
        let uri: Uri = target.parse().map_err(|e: http::uri::InvalidUri| {
            TestError::InvalidTarget(format!("{target}: {e}"))
        })?;

        Ok(TestRequest {
            method: self.method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_kept_raw() {
        let request = TestRequest::get("/simple/dollar%24").build().unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/simple/dollar%24");
        assert!(request.query.is_none());
    }

    #[test]
    fn test_query_is_split_off() {
        let request = TestRequest::get("/search?q=rust").build().unwrap();
        assert_eq!(request.path, "/search");
        assert_eq!(request.query.as_deref(), Some("q=rust"));
    }

    #[test]
    fn test_query_pairs_are_encoded_and_appended() {
        let request = TestRequest::get("/search?q=rust")
            .query("tag", "a&b")
            .build()
            .unwrap();
        assert_eq!(request.query.as_deref(), Some("q=rust&tag=a%26b"));
    }

    #[test]
    fn test_segment_encoding() {
        let request = TestRequest::get("/hello").segment("dollar$").build().unwrap();
        assert_eq!(request.path, "/hello/dollar%24");

        let request = TestRequest::get("/").segment("a/b").build().unwrap();
        assert_eq!(request.path, "/a%2Fb");
    }

    #[test]
    fn test_invalid_targets() {
        assert!(matches!(
            TestRequest::get("relative").build(),
            Err(TestError::InvalidTarget(_))
        ));
        assert!(matches!(
            TestRequest::get("/has space").build(),
            Err(TestError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_extension_method() {
        let request = TestRequestBuilder::from_method_str("PURGE", "/cache")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.method.as_str(), "PURGE");

        assert!(matches!(
            TestRequestBuilder::from_method_str("BAD METHOD", "/"),
            Err(TestError::InvalidMethod(_))
        ));
    }
}
