//! Required-header guard.
//!
//! Halts requests that lack a header (or send it empty) and answers with a
//! JSON error envelope.

use http::header::HeaderName;
use http::StatusCode;
use rou_core::envelope::write_error_json;
use rou_core::{Request, ResponseWriter};

use crate::middleware::Middleware;

/// Middleware that requires a non-empty request header.
///
/// # Example
///
/// ```
/// use rou_middleware::stages::RequireHeader;
/// use http::{header::AUTHORIZATION, StatusCode};
///
/// let auth = RequireHeader::new(AUTHORIZATION, "Authorization header should be provided")
///     .with_status(StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Clone)]
pub struct RequireHeader {
    header: HeaderName,
    status: StatusCode,
    message: String,
}

impl RequireHeader {
    /// Requires `header`, answering 400 with `message` when it is missing.
    #[must_use]
    pub fn new(header: HeaderName, message: impl Into<String>) -> Self {
        Self {
            header,
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Sets the status used when the header is missing.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the required header.
    #[must_use]
    pub const fn header(&self) -> &HeaderName {
        &self.header
    }

    fn is_present(&self, request: &Request) -> bool {
        request
            .headers()
            .get(&self.header)
            .is_some_and(|value| !value.is_empty())
    }
}

impl Middleware for RequireHeader {
    fn name(&self) -> &'static str {
        "require_header"
    }

    fn handle(&self, writer: &mut ResponseWriter, request: &Request) -> bool {
        if self.is_present(request) {
            return true;
        }

        if let Err(error) = write_error_json(writer, self.status, &self.message) {
            tracing::error!(error = %error, header = %self.header, "failed to write error envelope");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::header::AUTHORIZATION;

    fn request_with(header: Option<(&str, &str)>) -> Request {
        let mut builder = http::Request::builder().uri("/users");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(Bytes::new()).unwrap()
    }

    #[test]
    fn test_present_header_continues() {
        let mw = RequireHeader::new(AUTHORIZATION, "missing");
        let mut writer = ResponseWriter::new();

        assert!(mw.handle(&mut writer, &request_with(Some(("Authorization", "secret key")))));
        assert!(!writer.is_committed());
    }

    #[test]
    fn test_missing_header_halts_with_envelope() {
        let mw = RequireHeader::new(AUTHORIZATION, "Authorization header should be provided");
        let mut writer = ResponseWriter::new();

        assert!(!mw.handle(&mut writer, &request_with(None)));
        assert_eq!(writer.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(writer.body()).unwrap();
        assert_eq!(body["error"]["message"], "Authorization header should be provided");
        assert_eq!(body["error"]["code"], 400);
        assert!(body["body"].is_null());
    }

    #[test]
    fn test_empty_header_counts_as_missing() {
        let mw = RequireHeader::new(HeaderName::from_static("x-request-data"), "missing");
        let mut writer = ResponseWriter::new();

        assert!(!mw.handle(&mut writer, &request_with(Some(("X-Request-Data", "")))));
    }

    #[test]
    fn test_custom_status() {
        let mw = RequireHeader::new(AUTHORIZATION, "no token").with_status(StatusCode::UNAUTHORIZED);
        let mut writer = ResponseWriter::new();

        assert!(!mw.handle(&mut writer, &request_with(None)));
        assert_eq!(writer.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(mw.header(), &AUTHORIZATION);
    }
}
