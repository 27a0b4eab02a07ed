//! API feature modules.
//!
//! Each module mounts its endpoints on the register it is handed; nothing is
//! collected through global state. The server builds the module list once
//! and passes it in explicitly.

pub mod admin;
pub mod health;
pub mod user;

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::config::AppConfig;
use crate::routing::{Handler, RouteInfo, RouteRegister};

pub use admin::AdminModule;
pub use health::HealthModule;
pub use user::UserModule;

/// Shared state handed to route modules at registration time.
#[derive(Debug)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
    routes: OnceLock<Vec<RouteInfo>>,
}

impl ApiContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            routes: OnceLock::new(),
        }
    }

    /// Bound route table; empty until the tree has been flattened.
    pub fn routes(&self) -> &[RouteInfo] {
        self.routes.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Store the bound route table. Only the first call has effect.
    pub fn set_routes(&self, routes: Vec<RouteInfo>) {
        if self.routes.set(routes).is_err() {
            tracing::warn!("Route table already set, ignoring");
        }
    }
}

/// A feature module contributing routes.
pub trait RouteModule: Send + Sync {
    /// Module name for logging.
    fn name(&self) -> &'static str;

    /// Mount this module's routes on `rr`.
    fn register_routes(&self, rr: &mut RouteRegister<Handler>, ctx: &Arc<ApiContext>);
}

/// The modules mounted under `/api`.
pub fn default_modules() -> Vec<Box<dyn RouteModule>> {
    vec![
        Box::new(HealthModule),
        Box::new(UserModule),
        Box::new(AdminModule),
    ]
}
