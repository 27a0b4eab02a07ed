//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests entering a route, by method and route
//! - `api_responses_total` (counter): responses by method, route and status
//! - `api_request_duration_seconds` (histogram): route latency including the
//!   request timeout
//!
//! # Design Decisions
//! - Routes are labelled by pattern, never by raw path, to bound cardinality
//! - The per-route counter is attached as named middleware so every bound
//!   route gets it without modules opting in
//! - Responses are recorded by [`track_metrics`], a route layer outside the
//!   timeout, so requests that time out are counted with their 408

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::{Flow, Handler};

/// Pattern of the route that matched, placed in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute(pub String);

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    ::metrics::counter!(
        "api_responses_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("api_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Route layer: records every response of a matched route.
pub async fn track_metrics(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };
    let method = req.method().to_string();

    let response = next.run(req).await;
    record_request(&method, response.status().as_u16(), &route, start);
    response
}

/// Named middleware: counts requests per route and tags them with the
/// route pattern.
pub fn request_metrics(pattern: &str) -> Handler {
    let route = pattern.to_string();
    Handler::middleware("request_metrics", move |mut req: Request<Body>| {
        let route = route.clone();
        async move {
            ::metrics::counter!(
                "api_requests_total",
                "method" => req.method().to_string(),
                "route" => route.clone()
            )
            .increment(1);
            tracing::debug!(route = %route, path = %req.uri().path(), "Route matched");
            req.extensions_mut().insert(MatchedRoute(route));
            Flow::Next(req)
        }
    })
}
