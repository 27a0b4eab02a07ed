//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the final configuration (after CLI overrides)
//! - Start the metrics exporter when enabled
//! - Register and bind all routes
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes are bound before the listener opens (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::default_modules;
use crate::config::validation::validate_config;
use crate::config::{AppConfig, ConfigError};
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::metrics::init_metrics;

/// Run the API server with `config` until a shutdown signal.
pub async fn start(config: AppConfig) -> Result<(), ServerError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e| ServerError::Metrics(format!("{}", e)))?;
        init_metrics(addr).map_err(|e| ServerError::Metrics(e.to_string()))?;
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, default_modules());

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await
}
