//! Ordered middleware chain.
//!
//! A [`Chain`] runs its middleware in insertion order and stops at the first
//! one that returns `false`. The dispatcher keeps one chain for the whole
//! router and one per route.

use std::sync::Arc;

use rou_core::{Request, ResponseWriter};

use crate::middleware::{BoxedMiddleware, Middleware};

/// An ordered, short-circuiting list of middleware.
///
/// # Example
///
/// ```
/// use rou_middleware::{Chain, FnMiddleware};
/// use rou_core::{Request, ResponseWriter};
/// use bytes::Bytes;
///
/// let mut chain = Chain::new();
/// chain.push(FnMiddleware::new("first", |_w, _r| true));
/// chain.push(FnMiddleware::new("second", |w, _r| {
///     w.write_str("stopped");
///     false
/// }));
///
/// let mut writer = ResponseWriter::new();
/// assert!(!chain.run(&mut writer, &Request::new(Bytes::new())));
/// assert_eq!(chain.names(), vec!["first", "second"]);
/// ```
#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<BoxedMiddleware>,
}

impl Chain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware.
    pub fn push<M: Middleware>(&mut self, middleware: M) {
        self.stages.push(Arc::new(middleware));
    }

    /// Appends an already shared middleware.
    pub fn push_boxed(&mut self, middleware: BoxedMiddleware) {
        self.stages.push(middleware);
    }

    /// Runs every middleware in order.
    ///
    /// Returns `false` as soon as one middleware halts; the remaining ones are
    /// not called.
    pub fn run(&self, writer: &mut ResponseWriter, request: &Request) -> bool {
        for stage in &self.stages {
            if !stage.handle(writer, request) {
                tracing::debug!(
                    middleware = stage.name(),
                    path = request.uri().path(),
                    "middleware halted request"
                );
                return false;
            }
        }
        true
    }

    /// Returns the names of the middleware in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Returns the number of middleware.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("stages", &self.names())
            .finish()
    }
}
