//! Buffered response sink.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode};

/// Response sink handed to middleware and handlers.
///
/// The status line is committed by the first [`write_header`](Self::write_header)
/// call, or implicitly as 200 by the first body write. Later status writes are
/// ignored and logged. Headers stay editable until the writer is converted
/// into an [`http::Response`].
///
/// # Example
///
/// ```
/// use rou_core::ResponseWriter;
/// use http::StatusCode;
///
/// let mut writer = ResponseWriter::new();
/// writer.write_header(StatusCode::CREATED);
/// writer.write_str("created");
///
/// let response = writer.into_response();
/// assert_eq!(response.status(), StatusCode::CREATED);
/// assert_eq!(response.body().as_ref(), b"created");
/// ```
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    /// Creates an empty, uncommitted writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response headers for modification.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Commits the response status.
    ///
    /// Returns `false` and leaves the status unchanged if it was already
    /// committed.
    pub fn write_header(&mut self, status: StatusCode) -> bool {
        if let Some(committed) = self.status {
            tracing::warn!(
                committed = committed.as_u16(),
                ignored = status.as_u16(),
                "superfluous write_header call"
            );
            return false;
        }
        self.status = Some(status);
        true
    }

    /// Appends bytes to the body, committing 200 if no status was written.
    pub fn write_bytes(&mut self, data: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(data);
    }

    /// Appends a string to the body.
    pub fn write_str(&mut self, data: &str) {
        self.write_bytes(data.as_bytes());
    }

    /// Returns the committed status, or 200 if nothing was committed.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Returns the committed status, if any.
    #[must_use]
    pub const fn committed_status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns true once a status has been written.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    /// Returns the body written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Converts the writer into an HTTP response.
    #[must_use]
    pub fn into_response(self) -> http::Response<Bytes> {
        let status = self.status();
        let mut response = http::Response::new(self.body.freeze());
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl std::io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
