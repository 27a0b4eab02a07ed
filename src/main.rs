//! route-register API server.
//!
//! # Architecture Overview
//!
//! ```text
//!   feature modules ──▶ RouteRegister tree ──▶ AxumRouter ──▶ axum::Router
//!   (api::*)            (groups, prefixes,     (one pass at    (serves
//!                        handler chains)        startup)        requests)
//! ```

use std::path::PathBuf;

use clap::Parser;

use route_register::api::{default_modules, ApiContext};
use route_register::config::{load_config, AppConfig};
use route_register::http::HttpServer;
use route_register::lifecycle::startup;
use route_register::observability::logging::init_logging;
use route_register::routing::RouteRegister;

#[derive(Parser)]
#[command(name = "route-register")]
#[command(about = "HTTP API server built on a hierarchical route register", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Print the resolved route table and exit.
    #[arg(long)]
    print_routes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_filter);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "route-register starting");

    if cli.print_routes {
        print_routes(config);
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        auth_enabled = config.auth.enabled,
        "Configuration loaded"
    );

    startup::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(config: AppConfig) {
    let context = std::sync::Arc::new(ApiContext::new(config));
    let rr: RouteRegister<_> = HttpServer::build_register(&context, &default_modules());

    for route in rr.routes() {
        let names: Vec<&str> = route.handlers.iter().map(|h| h.name()).collect();
        println!("{:<8} {:<32} {}", route.method.as_str(), route.pattern, names.join(" -> "));
    }
}
