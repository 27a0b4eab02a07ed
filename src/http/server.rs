//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route tree from the feature modules
//! - Flatten it onto an axum router
//! - Wire up middleware (tracing, timeout, metrics, request ID)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{ApiContext, RouteModule};
use crate::config::AppConfig;
use crate::http::request::request_id_middleware;
use crate::http::response::not_found;
use crate::observability::metrics::{request_metrics, track_metrics};
use crate::routing::{AxumRouter, Handler, NamedMiddleware, RouteInfo, RouteRegister};

/// Prefix every API module is mounted under.
pub const API_PREFIX: &str = "/api";

/// Errors raised while running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Metrics error: {0}")]
    Metrics(String),
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    context: Arc<ApiContext>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and modules.
    pub fn new(config: AppConfig, modules: Vec<Box<dyn RouteModule>>) -> Self {
        let context = Arc::new(ApiContext::new(config));

        let rr = Self::build_register(&context, &modules);
        let mut binder = AxumRouter::new();
        rr.register(&mut binder);
        let (routes, table) = binder.finish();
        context.set_routes(table);

        let router = Self::build_router(&context.config, routes);
        Self { router, context }
    }

    /// Collect every module's routes under [`API_PREFIX`].
    pub fn build_register(
        context: &Arc<ApiContext>,
        modules: &[Box<dyn RouteModule>],
    ) -> RouteRegister<Handler> {
        let metrics: NamedMiddleware<Handler> = Arc::new(request_metrics);
        let mut rr = RouteRegister::with_named_middleware(vec![metrics]);

        rr.group(API_PREFIX, [], |api| {
            for module in modules {
                let before = api.len();
                module.register_routes(api, context);
                tracing::debug!(
                    module = module.name(),
                    routes = api.len() - before,
                    "Module routes registered"
                );
            }
        });

        rr
    }

    /// Wrap the bound routes with the global middleware layers.
    ///
    /// Timeout and metrics apply to matched routes only; the metrics layer
    /// sits outside the timeout so timed-out requests are recorded.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, routes: Router) -> Router {
        routes
            .route_layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .route_layer(middleware::from_fn(track_metrics))
            .fallback(not_found)
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered axum router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Routes bound at construction, in binding order.
    pub fn routes(&self) -> &[RouteInfo] {
        self.context.routes()
    }

    pub fn config(&self) -> &AppConfig {
        &self.context.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
