//! Request logging middleware.

use rou_core::{Request, ResponseWriter};
use tracing::Level;

use crate::middleware::Middleware;

/// Emits one `tracing` event per request with its method and path.
///
/// Never halts. Place it first in the global chain to see every request,
/// including those a later middleware rejects.
#[derive(Debug, Clone)]
pub struct RequestLog {
    level: Level,
}

impl Default for RequestLog {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl RequestLog {
    /// Logs at `INFO`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs at `level`.
    #[must_use]
    pub const fn with_level(level: Level) -> Self {
        Self { level }
    }
}

impl Middleware for RequestLog {
    fn name(&self) -> &'static str {
        "request_log"
    }

    fn handle(&self, _writer: &mut ResponseWriter, request: &Request) -> bool {
        let method = request.method().as_str();
        let path = request.uri().path();

        // tracing requires a constant level per callsite.
        match self.level {
            Level::ERROR => tracing::error!(method, path, "request received"),
            Level::WARN => tracing::warn!(method, path, "request received"),
            Level::INFO => tracing::info!(method, path, "request received"),
            Level::DEBUG => tracing::debug!(method, path, "request received"),
            _ => tracing::trace!(method, path, "request received"),
        }
        true
    }
}
