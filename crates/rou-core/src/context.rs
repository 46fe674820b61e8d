//! Per-request handler context.
//!
//! The [`Context`] bundles what a handler needs for one request: the response
//! writer, the request itself, the route parameters bound by the matched
//! pattern and lazily parsed query parameters.

use std::cell::OnceCell;

use http::StatusCode;
use rou_router::Params;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{write_error_json, write_success_json};
use crate::error::{RouError, RouResult};
use crate::query::QueryParams;
use crate::writer::ResponseWriter;
use crate::Request;

/// Per-request context handed to handlers.
///
/// # Example
///
/// ```
/// use rou_core::{Context, Request, ResponseWriter};
/// use rou_router::Params;
/// use bytes::Bytes;
///
/// let request = http::Request::builder()
///     .uri("/users/10?name=Joe")
///     .body(Bytes::new())
///     .unwrap();
/// let mut params = Params::new();
/// params.set("id", "10");
///
/// let mut writer = ResponseWriter::new();
/// let mut ctx = Context::new(&mut writer, &request, params);
///
/// assert_eq!(ctx.route_params().get("id"), Some("10"));
/// assert_eq!(ctx.query().get("name"), Some("Joe"));
/// ctx.success_json(&"ok").unwrap();
///
/// assert_eq!(writer.body(), br#"{"error":null,"body":"ok"}"#);
/// ```
pub struct Context<'a> {
    writer: &'a mut ResponseWriter,
    request: &'a Request,
    params: Params,
    query: OnceCell<QueryParams>,
}

impl<'a> Context<'a> {
    /// Creates a context for one request.
    #[must_use]
    pub fn new(writer: &'a mut ResponseWriter, request: &'a Request, params: Params) -> Self {
        Self {
            writer,
            request,
            params,
            query: OnceCell::new(),
        }
    }

    /// Returns the response writer.
    pub fn response_writer(&mut self) -> &mut ResponseWriter {
        &mut *self.writer
    }

    /// Returns the request.
    #[must_use]
    pub const fn request(&self) -> &'a Request {
        self.request
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &'a str {
        self.request.uri().path()
    }

    /// Returns the query-string parameters, parsed on first access.
    pub fn query(&self) -> &QueryParams {
        self.query
            .get_or_init(|| QueryParams::parse(self.request.uri().query()))
    }

    /// Returns the route parameters.
    #[must_use]
    pub const fn route_params(&self) -> &Params {
        &self.params
    }

    /// Returns the route parameters for modification.
    pub fn route_params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Decodes the request body as JSON.
    ///
    /// Fails with [`RouError::InvalidBody`], which renders as a 400
    /// "Request body is not valid" envelope when returned from a handler.
    pub fn parse_json<T: DeserializeOwned>(&self) -> RouResult<T> {
        serde_json::from_slice(self.request.body()).map_err(|source| RouError::InvalidBody { source })
    }

    /// Writes `{"error":null,"body":<payload>}` with status 200.
    ///
    /// A status committed earlier through [`response_writer`](Self::response_writer)
    /// wins over the 200.
    pub fn success_json<T: ?Sized + Serialize>(&mut self, payload: &T) -> RouResult<()> {
        write_success_json(self.writer, payload)
    }

    /// Writes `{"error":{"message":..,"code":..},"body":null}` with `status`.
    pub fn error_json(&mut self, status: StatusCode, message: &str) -> RouResult<()> {
        write_error_json(self.writer, status, message)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("method", self.request.method())
            .field("uri", self.request.uri())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde::Deserialize;

    fn request(uri: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_route_and_query_params_are_independent() {
        let request = request("/users/10/friends/melony?name=Joe&age=48", "");
        let params: Params = [("id", "10"), ("name", "melony")].into_iter().collect();
        let mut writer = ResponseWriter::new();
        let ctx = Context::new(&mut writer, &request, params);

        assert_eq!(ctx.route_params().get("name"), Some("melony"));
        assert_eq!(ctx.query().get("name"), Some("Joe"));
        assert_eq!(ctx.query().get("age"), Some("48"));
        assert_eq!(ctx.path(), "/users/10/friends/melony");
    }

    #[test]
    fn test_route_params_mut() {
        let request = request("/", "");
        let mut writer = ResponseWriter::new();
        let mut ctx = Context::new(&mut writer, &request, Params::new());

        ctx.route_params_mut().set("user", "Melony");
        assert!(ctx.route_params().has("user"));
        ctx.route_params_mut().delete("user");
        assert!(!ctx.route_params().has("user"));
    }

    #[test]
    fn test_success_json() {
        let request = request("/test-route", "");
        let mut writer = ResponseWriter::new();
        let mut ctx = Context::new(&mut writer, &request, Params::new());
        ctx.success_json(&"Response body").unwrap();

        assert_eq!(writer.status(), StatusCode::OK);
        assert_eq!(writer.body(), br#"{"error":null,"body":"Response body"}"#);
    }

    #[test]
    fn test_error_json() {
        let request = request("/test-route", "");
        let mut writer = ResponseWriter::new();
        let mut ctx = Context::new(&mut writer, &request, Params::new());
        ctx.error_json(StatusCode::UNAUTHORIZED, "Authorization header should be provided")
            .unwrap();

        assert_eq!(writer.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            writer.body(),
            br#"{"error":{"message":"Authorization header should be provided","code":401},"body":null}"#
        );
    }

    #[test]
    fn test_parse_json() {
        #[derive(Deserialize)]
        struct NewUser {
            name: String,
        }

        let request = request("/users", r#"{"name":"Melony"}"#);
        let mut writer = ResponseWriter::new();
        let ctx = Context::new(&mut writer, &request, Params::new());

        let user: NewUser = ctx.parse_json().unwrap();
        assert_eq!(user.name, "Melony");
    }

    #[test]
    fn test_parse_json_invalid_body() {
        let request = request("/users", "not json");
        let mut writer = ResponseWriter::new();
        let ctx = Context::new(&mut writer, &request, Params::new());

        let err = ctx.parse_json::<serde_json::Value>().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Request body is not valid");
    }

    #[test]
    fn test_response_writer_access() {
        let request = request("/", "");
        let mut writer = ResponseWriter::new();
        let mut ctx = Context::new(&mut writer, &request, Params::new());
        ctx.response_writer().write_str("raw");

        assert_eq!(writer.body(), b"raw");
    }
}
