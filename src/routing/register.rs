//! Hierarchical route registration.
//!
//! # Responsibilities
//! - Collect routes from feature modules with prefix and middleware scoping
//! - Compose handler chains down the group tree
//! - Flatten the tree into a concrete [`Router`] in one pass
//!
//! # Design Decisions
//! - Prefixes are joined by plain string concatenation, never path-joined,
//!   so `"/user" + ""` stays `"/user"` and `"/a" + "b"` becomes `"/ab"`
//! - Every node owns its own copy of the inherited handler list; a child
//!   extending it can never leak into a sibling
//! - Registration order is binding order: routes of a node first, then its
//!   groups, each in the order they were added
//! - No validation here; the concrete router rejects bad patterns at bind time

use std::fmt;
use std::sync::Arc;

use crate::routing::route::{Method, Route};

/// Sink the route tree is flattened into.
pub trait Router<H> {
    /// Bind one resolved route.
    fn route(&mut self, pattern: &str, method: Method, handlers: Vec<H>);
}

impl<H> Router<H> for Vec<Route<H>> {
    fn route(&mut self, pattern: &str, method: Method, handlers: Vec<H>) {
        self.push(Route::new(method, pattern, handlers));
    }
}

/// Builds a handler from the full pattern of the route it is attached to.
pub type NamedMiddleware<H> = Arc<dyn Fn(&str) -> H + Send + Sync>;

/// A node of the route tree.
///
/// The root has an empty prefix. Children are created with [`group`] or
/// [`insert`] and are fully populated before those calls return.
///
/// [`group`]: RouteRegister::group
/// [`insert`]: RouteRegister::insert
pub struct RouteRegister<H> {
    prefix: String,
    subfix_handlers: Vec<H>,
    named_middleware: Vec<NamedMiddleware<H>>,
    routes: Vec<Route<H>>,
    groups: Vec<RouteRegister<H>>,
}

impl<H: Clone> RouteRegister<H> {
    /// Create an empty root register.
    pub fn new() -> Self {
        Self::with_named_middleware(Vec::new())
    }

    /// Create a root register whose routes all start with the handlers
    /// produced by `named_middleware`, called with each route's full pattern.
    pub fn with_named_middleware(named_middleware: Vec<NamedMiddleware<H>>) -> Self {
        Self {
            prefix: String::new(),
            subfix_handlers: Vec::new(),
            named_middleware,
            routes: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Path prefix contributed by this node and its ancestors.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handlers every route in this subtree inherits.
    pub fn subfix_handlers(&self) -> &[H] {
        &self.subfix_handlers
    }

    pub fn get(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Get, pattern, handlers);
    }

    pub fn post(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Post, pattern, handlers);
    }

    pub fn put(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Put, pattern, handlers);
    }

    pub fn delete(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Delete, pattern, handlers);
    }

    pub fn patch(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Patch, pattern, handlers);
    }

    pub fn head(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Head, pattern, handlers);
    }

    pub fn options(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Options, pattern, handlers);
    }

    /// Register a route matching every method.
    pub fn any(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        self.route(Method::Any, pattern, handlers);
    }

    /// Append a route with the given method.
    pub fn route(&mut self, method: Method, pattern: &str, handlers: impl IntoIterator<Item = H>) {
        let full_pattern = format!("{}{}", self.prefix, pattern);

        let mut chain: Vec<H> = self
            .named_middleware
            .iter()
            .map(|make| make(&full_pattern))
            .collect();
        chain.extend(self.subfix_handlers.iter().cloned());
        chain.extend(handlers);

        self.routes.push(Route::new(method, full_pattern, chain));
    }

    /// Open a sub-scope under `pattern` whose routes also run `handlers`.
    ///
    /// `f` receives the new node; it is appended to this node's groups once
    /// `f` returns.
    pub fn group<F>(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>, f: F)
    where
        F: FnOnce(&mut RouteRegister<H>),
    {
        let mut child = self.child(pattern, handlers);
        f(&mut child);
        self.groups.push(child);
    }

    /// Like [`group`](Self::group), but the new scope is bound before every
    /// group already declared on this node.
    pub fn insert<F>(&mut self, pattern: &str, handlers: impl IntoIterator<Item = H>, f: F)
    where
        F: FnOnce(&mut RouteRegister<H>),
    {
        let mut child = self.child(pattern, handlers);
        f(&mut child);
        self.groups.insert(0, child);
    }

    fn child(&self, pattern: &str, handlers: impl IntoIterator<Item = H>) -> RouteRegister<H> {
        let mut subfix_handlers = self.subfix_handlers.clone();
        subfix_handlers.extend(handlers);

        RouteRegister {
            prefix: format!("{}{}", self.prefix, pattern),
            subfix_handlers,
            named_middleware: self.named_middleware.clone(),
            routes: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Flatten this subtree into `router`, depth first.
    pub fn register<R>(&self, router: &mut R)
    where
        R: Router<H> + ?Sized,
    {
        for route in &self.routes {
            router.route(&route.pattern, route.method, route.handlers.clone());
        }

        for group in &self.groups {
            group.register(router);
        }
    }

    /// Resolved routes of this subtree in binding order.
    pub fn routes(&self) -> Vec<Route<H>> {
        let mut routes = Vec::with_capacity(self.len());
        self.register(&mut routes);
        routes
    }

    /// Number of routes in this subtree.
    pub fn len(&self) -> usize {
        self.routes.len() + self.groups.iter().map(RouteRegister::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every route and group, keeping prefix and inherited handlers.
    pub fn reset(&mut self) {
        self.routes.clear();
        self.groups.clear();
    }
}

impl<H: Clone> Default for RouteRegister<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: fmt::Debug> fmt::Debug for RouteRegister<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegister")
            .field("prefix", &self.prefix)
            .field("subfix_handlers", &self.subfix_handlers)
            .field("named_middleware", &self.named_middleware.len())
            .field("routes", &self.routes)
            .field("groups", &self.groups)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type H = &'static str;

    /// Records every bind call in order.
    #[derive(Default)]
    struct RecordingRouter {
        calls: Vec<(Method, String, Vec<H>)>,
    }

    impl Router<H> for RecordingRouter {
        fn route(&mut self, pattern: &str, method: Method, handlers: Vec<H>) {
            self.calls.push((method, pattern.to_string(), handlers));
        }
    }

    fn flatten(rr: &RouteRegister<H>) -> Vec<(Method, String, Vec<H>)> {
        let mut router = RecordingRouter::default();
        rr.register(&mut router);
        router.calls
    }

    #[test]
    fn test_flat_routes() {
        let mut rr = RouteRegister::new();
        rr.delete("/admin", ["h1"]);
        rr.get("/down", ["h1", "h2"]);
        rr.post("/user", ["h1"]);
        rr.put("/user/friends", ["h1"]);

        let calls = flatten(&rr);
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], (Method::Delete, "/admin".to_string(), vec!["h1"]));
        assert_eq!(calls[1], (Method::Get, "/down".to_string(), vec!["h1", "h2"]));
        assert_eq!(calls[2], (Method::Post, "/user".to_string(), vec!["h1"]));
        assert_eq!(calls[3], (Method::Put, "/user/friends".to_string(), vec!["h1"]));
    }

    #[test]
    fn test_group_routes() {
        let mut rr = RouteRegister::new();
        rr.delete("/admin", ["a"]);
        rr.get("/down", ["b", "c"]);

        rr.group("/user", [], |user| {
            user.post("", ["d"]);
            user.put("/friends", ["e"]);

            user.group("/admin", ["h3"], |admin| {
                admin.delete("", ["f"]);
                admin.get("/all", ["g", "h", "i"]);
            });
        });

        let calls = flatten(&rr);
        let expected: Vec<(Method, &str, Vec<H>)> = vec![
            (Method::Delete, "/admin", vec!["a"]),
            (Method::Get, "/down", vec!["b", "c"]),
            (Method::Post, "/user", vec!["d"]),
            (Method::Put, "/user/friends", vec!["e"]),
            (Method::Delete, "/user/admin", vec!["h3", "f"]),
            (Method::Get, "/user/admin/all", vec!["h3", "g", "h", "i"]),
        ];

        assert_eq!(calls.len(), expected.len());
        for (call, (method, pattern, handlers)) in calls.iter().zip(expected) {
            assert_eq!(call.0, method);
            assert_eq!(call.1, pattern);
            assert_eq!(call.2, handlers);
        }
    }

    #[test]
    fn test_nested_handlers_keep_order() {
        let mut rr = RouteRegister::new();
        rr.group("/api", ["auth"], |api| {
            api.group("/orgs", ["org", "quota"], |orgs| {
                orgs.group("/:orgId", ["role"], |org| {
                    org.get("/users", ["validate", "list"]);
                });
            });
        });

        let calls = flatten(&rr);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "/api/orgs/:orgId/users");
        assert_eq!(
            calls[0].2,
            vec!["auth", "org", "quota", "role", "validate", "list"]
        );
    }

    #[test]
    fn test_prefix_is_plain_concatenation() {
        let mut rr = RouteRegister::new();
        rr.group("/user/", [], |g| {
            g.get("/double", ["a"]);
        });
        rr.group("/nodelim", [], |g| {
            g.get("tail", ["a"]);
            g.get("", ["a"]);
        });

        let patterns: Vec<String> = flatten(&rr).into_iter().map(|c| c.1).collect();
        assert_eq!(patterns, vec!["/user//double", "/nodelimtail", "/nodelim"]);
    }

    #[test]
    fn test_routes_before_groups_in_registration_order() {
        let mut rr = RouteRegister::new();
        rr.group("/z", [], |g| g.get("/1", ["a"]));
        rr.get("/b", ["a"]);
        rr.group("/a", [], |g| g.get("/2", ["a"]));
        rr.post("/a", ["a"]);

        let patterns: Vec<String> = flatten(&rr).into_iter().map(|c| c.1).collect();
        assert_eq!(patterns, vec!["/b", "/a", "/z/1", "/a/2"]);
    }

    #[test]
    fn test_group_does_not_touch_parent() {
        let mut rr = RouteRegister::new();
        rr.group("/api", ["auth"], |api| {
            api.get("/before", ["x"]);
            api.group("/admin", ["admin"], |admin| {
                admin.get("/stats", ["y"]);
            });
            assert_eq!(api.subfix_handlers(), &["auth"]);
            assert_eq!(api.prefix(), "/api");
            api.get("/after", ["z"]);
        });

        assert!(rr.subfix_handlers().is_empty());
        assert_eq!(rr.prefix(), "");

        let calls = flatten(&rr);
        assert_eq!(calls[0].2, vec!["auth", "x"]);
        assert_eq!(calls[1].2, vec!["auth", "z"]);
        assert_eq!(calls[2].2, vec!["auth", "admin", "y"]);
    }

    #[test]
    fn test_sibling_groups_do_not_share_handlers() {
        let mut rr = RouteRegister::new();
        rr.group("/api", ["auth"], |api| {
            api.group("/a", ["only-a"], |a| a.get("", ["end"]));
            api.group("/b", ["only-b"], |b| b.get("", ["end"]));
        });

        let calls = flatten(&rr);
        assert_eq!(calls[0].2, vec!["auth", "only-a", "end"]);
        assert_eq!(calls[1].2, vec!["auth", "only-b", "end"]);
    }

    #[test]
    fn test_route_count_matches_registrations() {
        let mut rr = RouteRegister::new();
        let mut registered = 0;
        for i in 0..3 {
            rr.get(&format!("/top{}", i), ["h"]);
            registered += 1;
        }
        rr.group("/g", ["m"], |g| {
            for i in 0..4 {
                g.put(&format!("/{}", i), ["h"]);
            }
            g.group("/n", [], |n| {
                n.delete("/x", ["h"]);
                n.patch("/x", ["h"]);
            });
        });
        registered += 6;

        assert_eq!(rr.len(), registered);
        assert_eq!(flatten(&rr).len(), registered);
    }

    #[test]
    fn test_insert_binds_before_existing_groups() {
        let mut rr = RouteRegister::new();
        rr.group("/api", [], |g| g.get("/:slug", ["generic"]));
        rr.insert("/api", [], |g| g.get("/health", ["health"]));

        let patterns: Vec<String> = flatten(&rr).into_iter().map(|c| c.1).collect();
        assert_eq!(patterns, vec!["/api/health", "/api/:slug"]);
    }

    #[test]
    fn test_named_middleware_receives_full_pattern() {
        let named: NamedMiddleware<String> =
            Arc::new(|pattern: &str| format!("metrics:{}", pattern));
        let mut rr = RouteRegister::with_named_middleware(vec![named]);
        rr.group("/api", ["auth".to_string()], |api| {
            api.get("/dashboards/uid/:uid", ["get".to_string()]);
        });

        let routes = rr.routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(
            routes[0].handlers,
            vec![
                "metrics:/api/dashboards/uid/:uid".to_string(),
                "auth".to_string(),
                "get".to_string(),
            ]
        );
    }

    #[test]
    fn test_any_and_extra_verbs() {
        let mut rr = RouteRegister::new();
        rr.any("/api/plugins/:pluginId/resources/*", ["proxy"]);
        rr.head("/ping", ["ping"]);
        rr.options("/ping", ["ping"]);

        let methods: Vec<Method> = rr.routes().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Any, Method::Head, Method::Options]);
    }

    #[test]
    fn test_reset_keeps_scope() {
        let mut rr = RouteRegister::new();
        rr.group("/api", ["auth"], |api| {
            api.get("/a", ["x"]);
            api.reset();
            assert!(api.is_empty());
            api.get("/b", ["y"]);
        });

        let routes = rr.routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].pattern, "/api/b");
        assert_eq!(routes[0].handlers, vec!["auth", "y"]);
    }
}
