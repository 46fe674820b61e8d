//! # rou-server
//!
//! Request dispatch and HTTP hosting for rou.
//!
//! - [`Router`]: route registration, global and per-route middleware, and
//!   dispatch with 404/405 disambiguation
//! - [`Server`]: serves an `Arc<Router>` over HTTP/1.1 with Hyper
//! - [`ShutdownSignal`] and [`ConnectionTracker`]: graceful shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use http::header::AUTHORIZATION;
//! use rou_middleware::stages::RequireHeader;
//! use rou_server::{Router, Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut router = Router::new();
//!     router
//!         .get("/users/:id", |ctx| {
//!             let id = ctx.route_params().get("id").unwrap_or_default().to_string();
//!             ctx.success_json(&id)
//!         })
//!         .middleware(RequireHeader::new(AUTHORIZATION, "Authorization header should be provided"));
//!
//!     Server::new(ServerConfig::default(), Arc::new(router)).run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/rou-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod router;
pub mod server;
pub mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use router::{DispatchOutcome, Endpoint, RouteHandle, Router};
pub use server::{HttpResponse, ResponseBody, Server, ServerError};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
