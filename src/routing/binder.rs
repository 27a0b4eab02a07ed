//! Binds a flattened route tree onto an axum router.
//!
//! # Responsibilities
//! - Translate route patterns into axum path syntax
//! - Map route methods onto axum method filters
//! - Mount each handler chain as one axum endpoint
//! - Keep a table of what was bound for inspection
//!
//! # Design Decisions
//! - Binding failures (overlapping methods, invalid paths) panic inside axum
//!   at startup; nothing is caught here
//! - Routes sharing a path are merged into one axum method router

use axum::{
    body::Body,
    http::Request,
    routing::{any, on, MethodFilter},
};
use serde::Serialize;

use crate::routing::handler::{Chain, Handler};
use crate::routing::pattern::{params, to_axum_path};
use crate::routing::register::Router;
use crate::routing::route::Method;

/// One entry of the bound route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: String,
    pub pattern: String,
    pub path: String,
    /// Parameter names the pattern captures, in order.
    pub params: Vec<String>,
    pub handlers: Vec<String>,
}

/// [`Router`] implementation backed by `axum::Router`.
#[derive(Default)]
pub struct AxumRouter {
    router: axum::Router,
    table: Vec<RouteInfo>,
}

impl AxumRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes bound so far, in binding order.
    pub fn table(&self) -> &[RouteInfo] {
        &self.table
    }

    /// Hand back the axum router and the route table.
    pub fn finish(self) -> (axum::Router, Vec<RouteInfo>) {
        tracing::info!(routes = self.table.len(), "Route tree bound");
        (self.router, self.table)
    }
}

fn method_filter(method: Method) -> Option<MethodFilter> {
    match method {
        Method::Get => Some(MethodFilter::GET),
        Method::Post => Some(MethodFilter::POST),
        Method::Put => Some(MethodFilter::PUT),
        Method::Delete => Some(MethodFilter::DELETE),
        Method::Patch => Some(MethodFilter::PATCH),
        Method::Head => Some(MethodFilter::HEAD),
        Method::Options => Some(MethodFilter::OPTIONS),
        Method::Any => None,
    }
}

impl Router<Handler> for AxumRouter {
    fn route(&mut self, pattern: &str, method: Method, handlers: Vec<Handler>) {
        let path = to_axum_path(pattern);
        let chain = Chain::new(pattern, handlers);

        tracing::debug!(
            method = %method,
            pattern = %pattern,
            path = %path,
            handlers = chain.len(),
            "Binding route"
        );

        self.table.push(RouteInfo {
            method: method.to_string(),
            pattern: pattern.to_string(),
            path: path.clone(),
            params: params(pattern),
            handlers: chain.names(),
        });

        let endpoint = move |req: Request<Body>| {
            let chain = chain.clone();
            async move { chain.run(req).await }
        };

        let method_router = match method_filter(method) {
            Some(filter) => on(filter, endpoint),
            None => any(endpoint),
        };

        let router = std::mem::take(&mut self.router);
        self.router = router.route(&path, method_router);
    }
}
