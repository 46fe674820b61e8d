//! # rou middleware
//!
//! Short-circuiting middleware chains for the rou router.
//!
//! Every request passes through two chains:
//!
//! ```text
//! Request → global chain → route lookup → route chain → Handler
//!              │                             │
//!              └─ halt: response is final ───┘
//! ```
//!
//! A middleware is a predicate over `(&mut ResponseWriter, &Request)`. The
//! first one returning `false` stops the request; whatever it wrote is the
//! response.
//!
//! ## Example
//!
//! ```
//! use rou_middleware::{Chain, from_fn};
//! use rou_middleware::stages::{RequestId, RequireHeader};
//! use http::header::AUTHORIZATION;
//!
//! let mut chain = Chain::new();
//! chain.push(RequestId::new());
//! chain.push(RequireHeader::new(AUTHORIZATION, "Authorization header should be provided"));
//! chain.push(from_fn(|_w, _r| true));
//!
//! assert_eq!(chain.names(), vec!["request_id", "require_header", "anonymous"]);
//! ```

#![doc(html_root_url = "https://docs.rs/rou-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod middleware;
pub mod stages;

pub use chain::Chain;
pub use middleware::{from_fn, BoxedMiddleware, FnMiddleware, Middleware};
