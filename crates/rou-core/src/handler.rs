//! Handler trait for request processing.

use std::sync::Arc;

use crate::context::Context;
use crate::error::RouResult;

/// A request handler.
///
/// Any `Fn(&mut Context<'_>) -> RouResult<()>` closure that is `Send + Sync`
/// is a handler. Implement the trait directly for handlers that carry state.
///
/// # Example
///
/// ```rust
/// use rou_core::{Context, Handler, RouResult};
///
/// struct Greeting {
///     text: String,
/// }
///
/// impl Handler for Greeting {
///     fn call(&self, ctx: &mut Context<'_>) -> RouResult<()> {
///         ctx.success_json(&self.text)
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles one request.
    fn call(&self, ctx: &mut Context<'_>) -> RouResult<()>;
}

impl<F> Handler for F
where
    F: Fn(&mut Context<'_>) -> RouResult<()> + Send + Sync + 'static,
{
    fn call(&self, ctx: &mut Context<'_>) -> RouResult<()> {
        self(ctx)
    }
}

/// Type-erased, shareable handler.
pub type BoxedHandler = Arc<dyn Handler>;
