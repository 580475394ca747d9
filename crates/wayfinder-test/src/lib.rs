//! # Wayfinder Test
//!
//! Test utilities for Wayfinder routers. Requests are resolved against a
//! [`wayfinder::Router`] in memory, with no transport involved.
//!
//! ## Key Features
//!
//! - **Request Builder**: raw targets are passed through untouched, so tests
//!   control percent-encoding exactly
//! - **Async Aware**: pending dispatches are awaited before the response is
//!   returned
//! - **Response Assertions**: `assert_handled`, `assert_no_match` and
//!   `assert_bind_error` with readable failure messages
//!
//! ## Example
//!
//! ```rust
//! use wayfinder::RoutingDsl;
//! use wayfinder_test::TestClient;
//!
//! # async fn run() -> Result<(), wayfinder::CompileError> {
//! let router = RoutingDsl::new()
//!     .get("/:a/:b/:c")
//!     .route_to(|a: i32, b: bool, c: String| format!("int {a} boolean {b} string {c}"))?
//!     .build();
//!
//! let client = TestClient::new(router);
//!
//! let response = client.get("/20/true/foo").send().await;
//! assert_eq!(response.assert_handled(), "int 20 boolean true string foo");
//!
//! client
//!     .get("/foo/true/bar")
//!     .send()
//!     .await
//!     .assert_bind_error("Cannot parse parameter a as Int: For input string: \"foo\"");
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/wayfinder-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::{Outcome, TestResponse};
