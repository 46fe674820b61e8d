//! Request ID middleware.
//!
//! Stamps every response with an `x-request-id` header so clients can
//! correlate their requests with server logs.
//!
//! ## Request ID Sources
//!
//! 1. **X-Request-ID header**: reused when incoming IDs are trusted and the
//!    value is a valid UUID
//! 2. **Generated UUID v7**: otherwise
//!
//! UUID v7 is time-ordered, so IDs sort by arrival.

use http::header::{HeaderName, HeaderValue};
use rou_core::{Request, ResponseWriter};
use uuid::Uuid;

use crate::middleware::Middleware;

/// The header name for request ID propagation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that generates or propagates request IDs.
///
/// Never halts.
#[derive(Debug, Clone, Default)]
pub struct RequestId {
    /// Whether to reuse an incoming `x-request-id` header.
    trust_incoming: bool,
}

impl RequestId {
    /// Creates a middleware that always generates a fresh ID.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a middleware that reuses valid incoming IDs.
    #[must_use]
    pub const fn trust_incoming() -> Self {
        Self {
            trust_incoming: true,
        }
    }

    fn extract(&self, request: &Request) -> Option<Uuid> {
        if !self.trust_incoming {
            return None;
        }

        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

impl Middleware for RequestId {
    fn name(&self) -> &'static str {
        "request_id"
    }

    fn handle(&self, writer: &mut ResponseWriter, request: &Request) -> bool {
        let id = self.extract(request).unwrap_or_else(Uuid::now_v7);

        // A hyphenated UUID is always a valid header value.
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            writer
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        tracing::trace!(request_id = %id, "assigned request id");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn response_id(mw: &RequestId, request: &Request) -> String {
        let mut writer = ResponseWriter::new();
        assert!(mw.handle(&mut writer, request));
        writer.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_generates_v7() {
        let id = response_id(&RequestId::new(), &Request::new(Bytes::new()));
        let uuid = Uuid::parse_str(&id).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[test]
    fn test_unique_per_request() {
        let mw = RequestId::new();
        let request = Request::new(Bytes::new());
        assert_ne!(response_id(&mw, &request), response_id(&mw, &request));
    }

    #[test]
    fn test_untrusted_incoming_is_replaced() {
        let incoming = Uuid::now_v7().to_string();
        let request = http::Request::builder()
            .header(REQUEST_ID_HEADER, &incoming)
            .body(Bytes::new())
            .unwrap();

        assert_ne!(response_id(&RequestId::new(), &request), incoming);
    }

    #[test]
    fn test_trusted_incoming_is_kept() {
        let incoming = Uuid::now_v7().to_string();
        let request = http::Request::builder()
            .header(REQUEST_ID_HEADER, &incoming)
            .body(Bytes::new())
            .unwrap();

        assert_eq!(response_id(&RequestId::trust_incoming(), &request), incoming);
    }

    #[test]
    fn test_trusted_invalid_incoming_is_replaced() {
        let request = http::Request::builder()
            .header(REQUEST_ID_HEADER, "not-a-uuid")
            .body(Bytes::new())
            .unwrap();

        assert_ne!(response_id(&RequestId::trust_incoming(), &request), "not-a-uuid");
    }
}
