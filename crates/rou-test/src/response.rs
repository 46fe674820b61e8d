//! Test response wrapper.

use std::fmt;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use rou_core::Response;
use rou_server::DispatchOutcome;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TestError;

/// A dispatched response with helpers for assertions.
///
/// Assertion methods panic with a descriptive message and return `&Self`,
/// so they can be chained.
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    outcome: Option<DispatchOutcome>,
}

impl TestResponse {
    /// Wraps a finished response.
    pub fn new(response: Response) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
            outcome: None,
        }
    }

    pub(crate) fn with_outcome(mut self, outcome: DispatchOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns how the router ended dispatch, when known.
    #[must_use]
    pub fn outcome(&self) -> Option<DispatchOutcome> {
        self.outcome
    }

    /// Returns the response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a string.
    ///
    /// # Errors
    ///
    /// Returns `TestError::BodyRead` if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str, TestError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `TestError::Json` if the body does not decode into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Returns the `body` member of the response envelope.
    ///
    /// # Errors
    ///
    /// Returns `TestError::Json` if the body is not JSON.
    pub fn envelope_body(&self) -> Result<Value, TestError> {
        let mut envelope: Value = self.json()?;
        Ok(envelope
            .get_mut("body")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Returns `error.message` from the response envelope, if present.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let envelope: Value = self.json().ok()?;
        envelope
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {} with body: {}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts how dispatch ended.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is unknown or differs.
    #[track_caller]
    pub fn assert_outcome(&self, expected: DispatchOutcome) -> &Self {
        assert_eq!(self.outcome, Some(expected), "Dispatch outcome mismatch");
        self
    }

    /// Asserts that a header exists with the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing or differs.
    #[track_caller]
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let expected = expected.as_ref();
        let actual = self
            .header_str(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found"));
        assert_eq!(actual, expected, "Header '{name}' mismatch");
        self
    }

    /// Asserts that a header is absent.
    ///
    /// # Panics
    ///
    /// Panics if the header is present.
    #[track_caller]
    pub fn assert_no_header(&self, name: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        assert!(
            self.header(name).is_none(),
            "Header '{name}' should be absent"
        );
        self
    }

    /// Asserts that the body equals `expected` exactly.
    ///
    /// # Panics
    ///
    /// Panics if the body is not UTF-8 or differs.
    #[track_caller]
    pub fn assert_body_eq(&self, expected: impl AsRef<str>) -> &Self {
        let body = self
            .text()
            .unwrap_or_else(|e| panic!("Body should be text: {e}"));
        assert_eq!(body, expected.as_ref(), "Body mismatch");
        self
    }

    /// Asserts that the body contains `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not UTF-8 or lacks the substring.
    #[track_caller]
    pub fn assert_body_contains(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let body = self
            .text()
            .unwrap_or_else(|e| panic!("Body should be text: {e}"));
        assert!(
            body.contains(expected),
            "Body should contain '{expected}', got: {body}"
        );
        self
    }

    /// Asserts that the body is JSON equal to `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON or differs.
    #[track_caller]
    pub fn assert_json_eq(&self, expected: &Value) -> &Self {
        let actual: Value = self
            .json()
            .unwrap_or_else(|e| panic!("Body should be JSON: {e}"));
        assert_eq!(&actual, expected, "JSON body mismatch");
        self
    }

    /// Asserts a success envelope carrying `expected` as its body.
    ///
    /// # Panics
    ///
    /// Panics if the response is not `{"error":null,"body":expected}`.
    #[track_caller]
    pub fn assert_success_body(&self, expected: &Value) -> &Self {
        self.assert_json_eq(&serde_json::json!({ "error": null, "body": expected }))
    }

    /// Asserts an error envelope with the given status and message.
    ///
    /// # Panics
    ///
    /// Panics if status, code or message differ.
    #[track_caller]
    pub fn assert_error(&self, status: StatusCode, message: &str) -> &Self {
        self.assert_status(status).assert_json_eq(&serde_json::json!({
            "error": { "message": message, "code": status.as_u16() },
            "body": null,
        }))
    }
}

impl fmt::Debug for TestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status)
            .field("outcome", &self.outcome)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_response(status: u16, body: &str) -> TestResponse {
        let response = http::Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Bytes::from(body.to_string()))
            .unwrap();
        TestResponse::new(response)
    }

    #[test]
    fn test_accessors() {
        let response = create_response(200, r#"{"error":null,"body":"ok"}"#);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.outcome(), None);
        assert_eq!(response.envelope_body().unwrap(), json!("ok"));
    }

    #[test]
    fn test_error_message() {
        let response = create_response(
            404,
            r#"{"error":{"message":"Page not found","code":404},"body":null}"#,
        );
        assert_eq!(response.error_message().as_deref(), Some("Page not found"));
        response.assert_error(StatusCode::NOT_FOUND, "Page not found");
    }

    #[test]
    fn test_plain_text_has_no_error_message() {
        let response = create_response(401, "Authorization header should be provided");
        assert_eq!(response.error_message(), None);
        response.assert_body_contains("Authorization");
        assert!(response.json::<Value>().is_err());
    }

    #[test]
    fn test_chained_assertions() {
        let response = create_response(200, r#"{"error":null,"body":{"id":"1"}}"#);
        response
            .assert_status(StatusCode::OK)
            .assert_header("content-type", "application/json")
            .assert_no_header("x-request-id")
            .assert_success_body(&json!({"id": "1"}))
            .assert_body_eq(r#"{"error":null,"body":{"id":"1"}}"#);
    }

    #[test]
    fn test_outcome() {
        let response = create_response(200, "{}").with_outcome(DispatchOutcome::Handled);
        response.assert_outcome(DispatchOutcome::Handled);
    }

    #[test]
    #[should_panic(expected = "Expected status 201 Created")]
    fn test_assert_status_panics() {
        create_response(200, "{}").assert_status(StatusCode::CREATED);
    }

    #[test]
    fn test_invalid_utf8() {
        let response = TestResponse::new(http::Response::new(Bytes::from_static(&[0xff, 0xfe])));
        assert!(matches!(response.text(), Err(TestError::BodyRead(_))));
    }
}
