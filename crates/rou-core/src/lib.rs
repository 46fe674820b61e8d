//! # rou core
//!
//! Core types shared by the rou crates:
//!
//! - [`Context`] - Per-request context handed to handlers
//! - [`ResponseWriter`] - Buffered response sink used by middleware and handlers
//! - [`QueryParams`] - Multi-valued query-string accessor
//! - [`RouError`] - Handler error type with HTTP status mapping
//! - [`Handler`] - Handler trait, implemented for closures
//! - [`envelope`] - The `{"error": .., "body": ..}` JSON envelope helpers

#![doc(html_root_url = "https://docs.rs/rou-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
pub mod envelope;
mod error;
mod handler;
mod query;
mod writer;

pub use context::Context;
pub use envelope::{ErrorObject, ResponseEnvelope};
pub use error::{RouError, RouResult};
pub use handler::{BoxedHandler, Handler};
pub use query::QueryParams;
pub use writer::ResponseWriter;

/// Request type seen by middleware and handlers: the body is fully buffered.
pub type Request = http::Request<bytes::Bytes>;

/// Response type produced by the dispatcher.
pub type Response = http::Response<bytes::Bytes>;
