use std::sync::Arc;

use axum::Json;
use serde::Serialize;

use crate::api::{ApiContext, RouteModule};
use crate::routing::{Handler, RouteRegister};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Unauthenticated liveness endpoint.
pub struct HealthModule;

impl RouteModule for HealthModule {
    fn name(&self) -> &'static str {
        "health"
    }

    fn register_routes(&self, rr: &mut RouteRegister<Handler>, _ctx: &Arc<ApiContext>) {
        rr.get("/health", [Handler::endpoint("health.get", |_req| get_health())]);
    }
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
