//! In-process test client.

use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use rou_core::ResponseWriter;
use rou_server::Router;
use serde::Serialize;

use crate::error::TestError;
use crate::request::TestRequestBuilder;
use crate::response::TestResponse;

/// Drives a [`Router`] without a network socket.
///
/// Requests go through the global chain, the route chain and the handler
/// exactly as they would behind [`rou_server::Server`].
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use rou_server::Router;
/// use rou_test::TestClient;
///
/// let mut router = Router::new();
/// router.get("/ping", |ctx| ctx.success_json(&"pong"));
///
/// let client = TestClient::new(router);
/// client
///     .get("/ping")
///     .send()
///     .assert_status(StatusCode::OK)
///     .assert_body_eq(r#"{"error":null,"body":"pong"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct TestClient {
    router: Arc<Router>,
    default_headers: HeaderMap,
}

impl TestClient {
    /// Creates a client over a router.
    pub fn new(router: impl Into<Arc<Router>>) -> Self {
        Self {
            router: router.into(),
            default_headers: HeaderMap::new(),
        }
    }

    /// Adds a header sent with every request.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid.
    #[must_use]
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::try_from(name)
            .unwrap_or_else(|e| panic!("invalid default header name {name:?}: {e}"));
        let value = HeaderValue::try_from(value)
            .unwrap_or_else(|e| panic!("invalid default header value {value:?}: {e}"));
        self.default_headers.insert(name, value);
        self
    }

    /// Returns the router under test.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Starts a GET request.
    pub fn get(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Starts a POST request.
    pub fn post(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Starts a PUT request.
    pub fn put(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Starts a PATCH request.
    pub fn patch(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Starts a DELETE request.
    pub fn delete(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Starts an OPTIONS request.
    pub fn options(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::OPTIONS, uri)
    }

    /// Starts a HEAD request.
    pub fn head(&self, uri: &str) -> TestClientRequest<'_> {
        self.request(Method::HEAD, uri)
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, uri: &str) -> TestClientRequest<'_> {
        let builder = self
            .default_headers
            .iter()
            .fold(TestRequestBuilder::new(method, uri), |b, (name, value)| {
                b.header_typed(name.clone(), value.clone())
            });
        TestClientRequest {
            client: self,
            builder,
        }
    }

    /// Dispatches an already built request.
    #[must_use]
    pub fn execute(&self, request: &rou_core::Request) -> TestResponse {
        let mut writer = ResponseWriter::new();
        let outcome = self.router.serve(&mut writer, request);
        TestResponse::new(writer.into_response()).with_outcome(outcome)
    }
}

/// A request bound to a [`TestClient`].
#[derive(Debug)]
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl TestClientRequest<'_> {
    /// Sets a header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(mut self, content_type: &str) -> Self {
        self.builder = self.builder.content_type(content_type);
        self
    }

    /// Sets a Bearer token.
    pub fn bearer_token(mut self, token: &str) -> Self {
        self.builder = self.builder.bearer_token(token);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sets a form-urlencoded body.
    pub fn form<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.form(value);
        self
    }

    /// Builds and dispatches the request.
    ///
    /// # Errors
    ///
    /// Returns the error recorded while building the request.
    pub fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        Ok(self.client.execute(&request))
    }

    /// Builds and dispatches the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built.
    #[track_caller]
    pub fn send(self) -> TestResponse {
        self.try_send()
            .unwrap_or_else(|e| panic!("failed to build test request: {e}"))
    }
}
