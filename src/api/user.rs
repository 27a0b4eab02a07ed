use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequest, Path},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestExt,
};
use serde_json::{json, Value};

use crate::api::{ApiContext, RouteModule};
use crate::http::response::error;
use crate::routing::{Handler, RouteRegister};
use crate::security::{require_api_key, require_role, Role, SignedInUser};

/// Endpoints about the signed-in user.
pub struct UserModule;

impl RouteModule for UserModule {
    fn name(&self) -> &'static str {
        "user"
    }

    fn register_routes(&self, rr: &mut RouteRegister<Handler>, ctx: &Arc<ApiContext>) {
        let auth = Arc::new(ctx.config.auth.clone());

        rr.group("/user", [require_api_key(auth)], |user| {
            user.get("", [Handler::endpoint("user.get", get_signed_in_user)]);
            user.put(
                "/preferences",
                [
                    require_role(Role::Editor),
                    Handler::endpoint("user.preferences.update", update_preferences),
                ],
            );
            user.get("/:login", [Handler::endpoint("user.lookup", get_user_by_login)]);
        });
    }
}

fn signed_in(req: &Request<Body>) -> Option<SignedInUser> {
    req.extensions().get::<SignedInUser>().cloned()
}

pub async fn get_signed_in_user(req: Request<Body>) -> Response {
    match signed_in(&req) {
        Some(user) => Json(user).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

pub async fn get_user_by_login(mut req: Request<Body>) -> Response {
    let requested_by = signed_in(&req).map(|u| u.login);

    match req.extract_parts::<Path<HashMap<String, String>>>().await {
        Ok(Path(params)) => match params.get("login") {
            Some(login) => Json(json!({
                "login": login,
                "requestedBy": requested_by,
            }))
            .into_response(),
            None => error(StatusCode::BAD_REQUEST, "Missing login"),
        },
        Err(rejection) => rejection.into_response(),
    }
}

pub async fn update_preferences(req: Request<Body>) -> Response {
    let login = signed_in(&req).map(|u| u.login);

    match Json::<Value>::from_request(req, &()).await {
        Ok(Json(preferences)) => {
            tracing::info!(login = ?login, "Preferences updated");
            Json(json!({
                "message": "Preferences updated",
                "preferences": preferences,
            }))
            .into_response()
        }
        Err(rejection) => rejection.into_response(),
    }
}
