//! # rou-test
//!
//! In-process testing for rou routers. Requests are dispatched straight into
//! [`rou_server::Router::serve`], so no socket or runtime is needed.
//!
//! ## Example
//!
//! ```
//! use http::StatusCode;
//! use rou_server::Router;
//! use rou_test::TestClient;
//! use serde_json::json;
//!
//! let mut router = Router::new();
//! router.get("/users/:id", |ctx| {
//!     let id = ctx.route_params().get("id").unwrap_or_default().to_string();
//!     ctx.success_json(&json!({ "id": id }))
//! });
//!
//! let client = TestClient::new(router);
//!
//! client
//!     .get("/users/42")
//!     .send()
//!     .assert_status(StatusCode::OK)
//!     .assert_success_body(&json!({ "id": "42" }));
//!
//! client
//!     .get("/groups/1")
//!     .send()
//!     .assert_error(StatusCode::NOT_FOUND, "Page not found");
//! ```

#![doc(html_root_url = "https://docs.rs/rou-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
