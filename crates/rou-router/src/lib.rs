//! Route table and path matcher for rou.
//!
//! This crate holds the pure, framework-agnostic part of routing:
//!
//! - **Path matching**: [`match_path`] compares a pattern such as
//!   `/users/:id` with a request path segment by segment
//! - **Parameters**: [`Params`] stores the values bound by `:name` segments
//! - **Route table**: [`RouteTable`] keeps routes per HTTP method in
//!   registration order and answers 404-vs-405 questions
//!
//! Matching is a linear scan. The first route registered for a method whose
//! pattern fits the path wins.
//!
//! # Example
//!
//! ```rust
//! use rou_router::RouteTable;
//! use http::Method;
//!
//! let mut table = RouteTable::new();
//! table.register(Method::GET, "/users", "listUsers");
//! table.register(Method::GET, "/users/:id/friends/:name", "getFriend");
//!
//! let (route, params) = table.find(&Method::GET, "/users/10/friends/melony").unwrap();
//! assert_eq!(route.path(), "/users/:id/friends/:name");
//! assert_eq!(params.get("id"), Some("10"));
//! assert_eq!(params.get("name"), Some("melony"));
//! ```

#![doc(html_root_url = "https://docs.rs/rou-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod matcher;
mod params;
mod table;

pub use matcher::{match_path, PARAM_PREFIX};
pub use params::Params;
pub use table::{Route, RouteKey, RouteTable};
