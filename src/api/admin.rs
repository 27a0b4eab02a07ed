use std::sync::Arc;

use axum::Json;
use serde::Serialize;

use crate::api::{ApiContext, RouteModule};
use crate::routing::{Handler, RouteInfo, RouteRegister};
use crate::security::{require_api_key, require_role, Role};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub route_count: usize,
}

/// Server administration endpoints, admin role only.
pub struct AdminModule;

impl RouteModule for AdminModule {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn register_routes(&self, rr: &mut RouteRegister<Handler>, ctx: &Arc<ApiContext>) {
        let guards = [
            require_api_key(Arc::new(ctx.config.auth.clone())),
            require_role(Role::Admin),
        ];

        rr.group("/admin", guards, |admin| {
            let status_ctx = ctx.clone();
            admin.get(
                "/status",
                [Handler::endpoint("admin.status", move |_req| {
                    get_status(status_ctx.clone())
                })],
            );

            let routes_ctx = ctx.clone();
            admin.get(
                "/routes",
                [Handler::endpoint("admin.routes", move |_req| {
                    get_routes(routes_ctx.clone())
                })],
            );
        });
    }
}

pub async fn get_status(ctx: Arc<ApiContext>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: ctx.started_at.elapsed().as_secs(),
        route_count: ctx.routes().len(),
    })
}

pub async fn get_routes(ctx: Arc<ApiContext>) -> Json<Vec<RouteInfo>> {
    Json(ctx.routes().to_vec())
}
