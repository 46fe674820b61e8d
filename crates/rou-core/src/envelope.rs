//! JSON response envelope.
//!
//! Every JSON response produced by rou has the same shape:
//!
//! ```text
//! {"error": null, "body": <payload>}                       success
//! {"error": {"message": "...", "code": 404}, "body": null}  failure
//! ```

use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{RouError, RouResult};
use crate::writer::ResponseWriter;

/// Message used when a request body cannot be decoded.
pub const MSG_INVALID_BODY: &str = "Request body is not valid";
/// Message used when the path exists under another method.
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";
/// Message used when no route fits the path.
pub const MSG_NOT_FOUND: &str = "Page not found";
/// Message used for errors whose details stay server-side.
pub const MSG_INTERNAL: &str = "Internal server error";
/// Message used when the request body did not arrive in time.
pub const MSG_TIMEOUT: &str = "Request timeout";

/// Error part of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, repeated in the body.
    pub code: u16,
}

impl ErrorObject {
    /// Creates an error object for `status`.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: status.as_u16(),
        }
    }
}

/// The `{"error": .., "body": ..}` wrapper.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope<'a, T: ?Sized> {
    /// Error, `null` on success.
    pub error: Option<ErrorObject>,
    /// Payload, `null` on error.
    pub body: Option<&'a T>,
}

impl<'a, T: ?Sized + Serialize> ResponseEnvelope<'a, T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(body: &'a T) -> Self {
        Self {
            error: None,
            body: Some(body),
        }
    }
}

impl ResponseEnvelope<'static, ()> {
    /// Wraps an error.
    #[must_use]
    pub const fn failure(error: ErrorObject) -> Self {
        Self {
            error: Some(error),
            body: None,
        }
    }
}

/// Serializes `value` and writes it with `status` and a JSON content type.
///
/// Serialization happens before anything touches the writer, so a failure
/// leaves the response uncommitted.
pub fn write_json<T: ?Sized + Serialize>(
    writer: &mut ResponseWriter,
    status: StatusCode,
    value: &T,
) -> RouResult<()> {
    let bytes = serde_json::to_vec(value).map_err(RouError::Serialization)?;

    writer
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    writer.write_header(status);
    writer.write_bytes(&bytes);
    Ok(())
}

/// Writes `{"error":null,"body":<payload>}` with status 200.
pub fn write_success_json<T: ?Sized + Serialize>(
    writer: &mut ResponseWriter,
    payload: &T,
) -> RouResult<()> {
    write_json(writer, StatusCode::OK, &ResponseEnvelope::success(payload))
}

/// Writes `{"error":{"message":..,"code":..},"body":null}` with `status`.
pub fn write_error_json(
    writer: &mut ResponseWriter,
    status: StatusCode,
    message: &str,
) -> RouResult<()> {
    let envelope = ResponseEnvelope::failure(ErrorObject::new(status, message));
    write_json(writer, status, &envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_string(&ResponseEnvelope::success("Response body")).unwrap();
        assert_eq!(json, r#"{"error":null,"body":"Response body"}"#);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = ResponseEnvelope::failure(ErrorObject::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND));
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"error":{"message":"Page not found","code":404},"body":null}"#
        );
    }

    #[test]
    fn test_write_success_json() {
        let mut writer = ResponseWriter::new();
        write_success_json(&mut writer, &vec![1, 2, 3]).unwrap();

        assert_eq!(writer.status(), StatusCode::OK);
        assert_eq!(writer.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(writer.body(), br#"{"error":null,"body":[1,2,3]}"#);
    }

    #[test]
    fn test_write_error_json() {
        let mut writer = ResponseWriter::new();
        write_error_json(&mut writer, StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
            .unwrap();

        assert_eq!(writer.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            writer.body(),
            br#"{"error":{"message":"Method not allowed","code":405},"body":null}"#
        );
    }

    #[test]
    fn test_serialization_failure_leaves_writer_untouched() {
        // Non-string map keys cannot be represented in JSON.
        let mut payload = HashMap::new();
        payload.insert(vec![1u8], "value");

        let mut writer = ResponseWriter::new();
        let result = write_success_json(&mut writer, &payload);

        assert!(matches!(result, Err(RouError::Serialization(_))));
        assert!(!writer.is_committed());
        assert!(writer.headers().is_empty());
        assert!(writer.body().is_empty());
    }
}
