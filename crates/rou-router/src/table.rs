//! Per-method route table.
//!
//! This module provides [`RouteTable`], the ordered store of registered
//! routes. Routes are kept per HTTP method in registration order, which is
//! also their match priority. A method-agnostic set of patterns answers the
//! "does this path exist at all" question used to pick 404 over 405.

use std::collections::{HashMap, HashSet};

use http::Method;
use indexmap::IndexSet;

use crate::matcher::match_path;
use crate::params::Params;

/// Identity of a registration: the (method, pattern) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// HTTP method
    pub method: Method,
    /// Route pattern as registered
    pub path: String,
}

impl RouteKey {
    /// Creates a new route key.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// A registered route: its pattern plus whatever the caller attached to it.
#[derive(Debug, Clone)]
pub struct Route<T> {
    path: String,
    endpoint: T,
}

impl<T> Route<T> {
    /// Returns the route pattern.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the endpoint stored for this route.
    #[must_use]
    pub fn endpoint(&self) -> &T {
        &self.endpoint
    }

    /// Returns the endpoint mutably.
    pub fn endpoint_mut(&mut self) -> &mut T {
        &mut self.endpoint
    }
}

/// Ordered route storage keyed by HTTP method.
///
/// `T` is the endpoint type carried by each route (for the dispatcher, a
/// handler plus its middleware chain).
///
/// # Example
///
/// ```rust
/// use rou_router::RouteTable;
/// use http::Method;
///
/// let mut table = RouteTable::new();
/// table.register(Method::GET, "/users/:id", "getUser");
///
/// let (route, params) = table.find(&Method::GET, "/users/123").unwrap();
/// assert_eq!(*route.endpoint(), "getUser");
/// assert_eq!(params.get("id"), Some("123"));
///
/// // The path exists, just not for POST.
/// assert!(table.find(&Method::POST, "/users/123").is_none());
/// assert!(table.path_exists("/users/123"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: HashMap<Method, Vec<Route<T>>>,
    registered: HashSet<RouteKey>,
    patterns: IndexSet<String>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            registered: HashSet::new(),
            patterns: IndexSet::new(),
        }
    }

    /// Registers a route.
    ///
    /// Returns the stored route so the caller can keep configuring it, or
    /// `None` when the (method, path) pair was already registered. A repeated
    /// registration is ignored: the first endpoint stays in place.
    pub fn register(
        &mut self,
        method: Method,
        path: impl Into<String>,
        endpoint: T,
    ) -> Option<&mut Route<T>> {
        let path = path.into();
        let key = RouteKey::new(method.clone(), path.clone());
        if !self.registered.insert(key) {
            return None;
        }

        self.patterns.insert(path.clone());
        let routes = self.routes.entry(method).or_default();
        routes.push(Route { path, endpoint });
        routes.last_mut()
    }

    /// Returns the routes registered for `method`, in registration order.
    #[must_use]
    pub fn routes_for(&self, method: &Method) -> &[Route<T>] {
        self.routes.get(method).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `path` fits any registered pattern under any method.
    #[must_use]
    pub fn path_exists(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| match_path(pattern, path).is_some())
    }

    /// Finds the first route for `method` whose pattern fits `path`.
    ///
    /// A route whose pattern equals the path verbatim matches without running
    /// the segment matcher and yields no parameters.
    #[must_use]
    pub fn find(&self, method: &Method, path: &str) -> Option<(&Route<T>, Params)> {
        self.routes_for(method).iter().find_map(|route| {
            if route.path == path {
                return Some((route, Params::new()));
            }
            match_path(&route.path, path).map(|params| (route, params))
        })
    }

    /// Returns true if the exact (method, path) pair is registered.
    #[must_use]
    pub fn contains(&self, method: &Method, path: &str) -> bool {
        self.registered.contains(&RouteKey::new(method.clone(), path))
    }

    /// Returns the distinct registered patterns, in first-seen order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Returns the total number of registered routes across all methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
