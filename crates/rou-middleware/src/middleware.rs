//! Core middleware trait and types.
//!
//! A middleware is a predicate over the response writer and the request. It
//! returns `true` to let the request continue and `false` to stop it. A
//! middleware that returns `false` owns the response: nothing after it writes.
//!
//! # Example
//!
//! ```
//! use rou_middleware::{Middleware, from_fn};
//! use rou_core::{Request, ResponseWriter};
//! use bytes::Bytes;
//!
//! let auth = from_fn(|w: &mut ResponseWriter, r: &Request| {
//!     if r.headers().contains_key("authorization") {
//!         return true;
//!     }
//!     w.write_str("Authorization header should be provided");
//!     false
//! });
//!
//! let mut writer = ResponseWriter::new();
//! let request = Request::new(Bytes::new());
//! assert!(!auth.handle(&mut writer, &request));
//! ```

use std::sync::Arc;

use rou_core::{Request, ResponseWriter};

/// Name reported by middleware that do not choose one.
pub const ANONYMOUS: &str = "anonymous";

/// The core middleware trait.
///
/// # Invariants
///
/// - Returning `false` halts the request; the middleware must have written
///   whatever response the client should see
/// - Middleware hold no per-request state of their own
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this middleware, used in logs.
    fn name(&self) -> &'static str {
        ANONYMOUS
    }

    /// Runs the middleware. `true` continues, `false` halts.
    fn handle(&self, writer: &mut ResponseWriter, request: &Request) -> bool;
}

/// A type-erased middleware that can be stored in a chain.
pub type BoxedMiddleware = Arc<dyn Middleware>;

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn handle(&self, writer: &mut ResponseWriter, request: &Request) -> bool {
        (**self).handle(writer, request)
    }
}

/// A middleware built from a closure.
///
/// ```
/// use rou_middleware::{FnMiddleware, Middleware};
///
/// let always = FnMiddleware::new("always", |_w, _r| true);
/// assert_eq!(always.name(), "always");
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&mut ResponseWriter, &Request) -> bool + Send + Sync + 'static,
{
    /// Creates a named function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut ResponseWriter, &Request) -> bool + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(&self, writer: &mut ResponseWriter, request: &Request) -> bool {
        (self.func)(writer, request)
    }
}

impl<F> std::fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMiddleware")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Creates an anonymous middleware from a closure.
pub fn from_fn<F>(func: F) -> FnMiddleware<F>
where
    F: Fn(&mut ResponseWriter, &Request) -> bool + Send + Sync + 'static,
{
    FnMiddleware::new(ANONYMOUS, func)
}
