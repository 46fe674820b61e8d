//! # rou
//!
//! An embeddable HTTP request router.
//!
//! - Literal and `:name` path segments, matched in registration order
//! - Global middleware and per-route middleware chains that can halt a request
//! - Distinct 404 (no such path) and 405 (path exists under another method)
//! - JSON envelope helpers: `{"error":null,"body":...}` and
//!   `{"error":{"message":...,"code":...},"body":null}`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rou::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().with_env_prefix("ROU").load()?;
//!     rou::telemetry::init_telemetry(&TelemetryConfig::from(&config))?;
//!
//!     let mut router = Router::new();
//!     router.use_middleware(RequestId::new());
//!     router.get("/users/:id", |ctx| {
//!         let id = ctx.route_params().get("id").unwrap_or_default().to_string();
//!         ctx.success_json(&id)
//!     });
//!
//!     Server::new(ServerConfig::from(&config.server), Arc::new(router))
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Dispatch
//!
//! ```text
//! Request → global chain → match → route chain → handler
//!              │ halt        │ miss      │ halt       │ Err
//!              ▼             ▼           ▼            ▼
//!          middleware's   404 / 405   middleware's  error envelope
//!           response                   response
//! ```

#![doc(html_root_url = "https://docs.rs/rou/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use rou_config as config;
pub use rou_core as core;
pub use rou_middleware as middleware;
pub use rou_router as router;
pub use rou_server as server;
pub use rou_telemetry as telemetry;

pub use rou_core::{Context, Request, Response, RouError, RouResult};
pub use rou_server::{Router, Server};

/// Prelude module for convenient imports.
///
/// ```
/// use rou::prelude::*;
///
/// let mut router = Router::new();
/// router.get("/ping", |ctx| ctx.success_json(&"pong"));
/// ```
pub mod prelude {
    pub use rou_config::{ConfigLoader, RouConfig};
    pub use rou_core::{
        Context, Handler, QueryParams, Request, Response, ResponseWriter, RouError, RouResult,
    };
    pub use rou_middleware::stages::{RequestId, RequestLog, RequireHeader};
    pub use rou_middleware::{from_fn, Middleware};
    pub use rou_router::Params;
    pub use rou_server::{
        DispatchOutcome, RouteHandle, Router, Server, ServerConfig, ShutdownSignal,
    };
    pub use rou_telemetry::TelemetryConfig;
}
