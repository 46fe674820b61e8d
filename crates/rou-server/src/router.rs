//! Request dispatcher.
//!
//! [`Router`] owns the route table and the global middleware chain, and turns
//! one `(response writer, request)` pair into exactly one of: a middleware
//! halt, a handler invocation, a 405 envelope or a 404 envelope.
//!
//! # Dispatch order
//!
//! 1. Global middleware, in registration order
//! 2. Route lookup for the request method (literal patterns compare first,
//!    then segment matching; the first registered match wins)
//! 3. Route middleware
//! 4. The handler
//!
//! When no route matches, the path is checked against every registered
//! pattern regardless of method to choose between 405 and 404.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use http::StatusCode;
//! use rou_core::Request;
//! use rou_server::Router;
//!
//! let mut router = Router::new();
//! router.get("/users/:id", |ctx| {
//!     let id = ctx.route_params().get("id").unwrap_or_default().to_string();
//!     ctx.success_json(&id)
//! });
//!
//! let request = http::Request::builder().uri("/users/42").body(Bytes::new()).unwrap();
//! let response = router.dispatch(&request);
//!
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(&response.body()[..], br#"{"error":null,"body":"42"}"#);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use http::{Method, StatusCode};
use percent_encoding::percent_decode_str;
use rou_core::envelope::{write_error_json, MSG_METHOD_NOT_ALLOWED, MSG_NOT_FOUND};
use rou_core::{
    BoxedHandler, Context, Handler, Request, Response, ResponseWriter, RouError, RouResult,
};
use rou_middleware::{Chain, Middleware};
use rou_router::{Route, RouteTable};

/// What a route resolves to: its handler and its own middleware chain.
pub struct Endpoint {
    handler: BoxedHandler,
    middleware: Chain,
}

impl Endpoint {
    fn new(handler: BoxedHandler) -> Self {
        Self {
            handler,
            middleware: Chain::new(),
        }
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// Returns the route middleware chain.
    #[must_use]
    pub const fn middleware(&self) -> &Chain {
        &self.middleware
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("middleware", &self.middleware)
            .finish_non_exhaustive()
    }
}

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// A global middleware returned `false`.
    HaltedGlobal,
    /// A route middleware returned `false`.
    HaltedRoute,
    /// The handler ran and returned `Ok`.
    Handled,
    /// The handler ran and returned `Err`.
    HandlerFailed,
    /// The path is registered, but not for this method.
    MethodNotAllowed,
    /// No registered pattern matches the path.
    NotFound,
}

impl DispatchOutcome {
    /// Returns the outcome as a metric label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HaltedGlobal => "halted_global",
            Self::HaltedRoute => "halted_route",
            Self::Handled => "handled",
            Self::HandlerFailed => "handler_failed",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::NotFound => "not_found",
        }
    }

    /// Returns `true` if a handler was invoked.
    #[must_use]
    pub const fn reached_handler(self) -> bool {
        matches!(self, Self::Handled | Self::HandlerFailed)
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by route registration.
///
/// Attaches middleware to the route just registered. When the registration
/// was a duplicate, the handle is detached and every call is a no-op.
#[derive(Debug)]
pub struct RouteHandle<'r> {
    route: Option<&'r mut Route<Endpoint>>,
}

impl RouteHandle<'_> {
    /// Appends a middleware to this route's chain.
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        if let Some(route) = self.route.as_deref_mut() {
            route.endpoint_mut().middleware.push(middleware);
        }
        self
    }

    /// Returns `true` if the registration created a new route.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.route.is_some()
    }
}

/// Method and path based request dispatcher.
///
/// Register routes and middleware through `&mut self`, then share the router
/// (e.g., behind an [`Arc`]) and call [`serve`](Router::serve) or
/// [`dispatch`](Router::dispatch) concurrently.
#[derive(Debug, Default)]
pub struct Router {
    table: RouteTable<Endpoint>,
    middleware: Chain,
}

macro_rules! method_routes {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<F>(&mut self, path: &str, handler: F) -> RouteHandle<'_>
            where
                F: Fn(&mut Context<'_>) -> RouResult<()> + Send + Sync + 'static,
            {
                self.handle(Method::$method, path, handler)
            }
        )*
    };
}

impl Router {
    /// Creates a router with no routes and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    method_routes! {
        /// Registers a GET route.
        get => GET;
        /// Registers a POST route.
        post => POST;
        /// Registers a PUT route.
        put => PUT;
        /// Registers a PATCH route.
        patch => PATCH;
        /// Registers a DELETE route.
        delete => DELETE;
        /// Registers an OPTIONS route.
        options => OPTIONS;
        /// Registers a HEAD route.
        head => HEAD;
    }

    /// Registers a closure for any method.
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> RouteHandle<'_>
    where
        F: Fn(&mut Context<'_>) -> RouResult<()> + Send + Sync + 'static,
    {
        self.handle(method, path, handler)
    }

    /// Registers a [`Handler`] for any method.
    ///
    /// The first registration of a `(method, path)` pair wins; repeating it
    /// is ignored and returns a detached handle.
    pub fn handle<H: Handler>(&mut self, method: Method, path: &str, handler: H) -> RouteHandle<'_> {
        let endpoint = Endpoint::new(Arc::new(handler));
        let route = self.table.register(method.clone(), path, endpoint);
        if route.is_none() {
            tracing::debug!(method = %method, path, "duplicate route ignored");
        }
        RouteHandle { route }
    }

    /// Appends a middleware to the global chain.
    pub fn use_middleware<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(middleware);
        self
    }

    /// Returns the routes registered for `method`, in match order.
    #[must_use]
    pub fn routes(&self, method: &Method) -> &[Route<Endpoint>] {
        self.table.routes_for(method)
    }

    /// Returns the underlying route table.
    #[must_use]
    pub const fn table(&self) -> &RouteTable<Endpoint> {
        &self.table
    }

    /// Dispatches one request into `writer`.
    pub fn serve(&self, writer: &mut ResponseWriter, request: &Request) -> DispatchOutcome {
        let started = Instant::now();
        let outcome = self.run(writer, request);

        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            outcome = outcome.as_str(),
            status = writer.status().as_u16(),
            "request dispatched"
        );
        rou_telemetry::metrics::record_dispatch(
            request.method().as_str(),
            outcome.as_str(),
            started.elapsed(),
        );

        outcome
    }

    /// Dispatches one request and returns the finished response.
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> Response {
        let mut writer = ResponseWriter::new();
        self.serve(&mut writer, request);
        writer.into_response()
    }

    fn run(&self, writer: &mut ResponseWriter, request: &Request) -> DispatchOutcome {
        if !self.middleware.run(writer, request) {
            return DispatchOutcome::HaltedGlobal;
        }

        // Routes match the decoded path; `Context::path` keeps the raw form.
        let path = percent_decode_str(request.uri().path()).decode_utf8_lossy();
        let Some((route, params)) = self.table.find(request.method(), &path) else {
            if self.table.path_exists(&path) {
                write_error(writer, StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED);
                return DispatchOutcome::MethodNotAllowed;
            }
            write_error(writer, StatusCode::NOT_FOUND, MSG_NOT_FOUND);
            return DispatchOutcome::NotFound;
        };

        let endpoint = route.endpoint();
        if !endpoint.middleware.run(writer, request) {
            return DispatchOutcome::HaltedRoute;
        }

        let result = {
            let mut ctx = Context::new(writer, request, params);
            endpoint.handler.call(&mut ctx)
        };

        match result {
            Ok(()) => DispatchOutcome::Handled,
            Err(err) => {
                handler_failed(writer, route.path(), &err);
                DispatchOutcome::HandlerFailed
            }
        }
    }
}

fn handler_failed(writer: &mut ResponseWriter, route: &str, err: &RouError) {
    if let Some(status) = writer.committed_status() {
        tracing::error!(
            route,
            status = status.as_u16(),
            error = %err,
            "handler failed after writing a response"
        );
        return;
    }

    let status = err.status_code();
    tracing::error!(route, status = status.as_u16(), error = %err, "handler failed");
    write_error(writer, status, err.client_message());
}

fn write_error(writer: &mut ResponseWriter, status: StatusCode, message: &str) {
    if let Err(err) = write_error_json(writer, status, message) {
        tracing::error!(error = %err, "failed to write error envelope");
    }
}
