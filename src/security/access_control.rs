//! Access control handlers.
//!
//! `require_api_key` must run before `require_role`: the role check reads
//! the `SignedInUser` the key check places in request extensions.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::config::AuthConfig;
use crate::routing::{Flow, Handler};
use crate::security::identity::{Role, SignedInUser};

/// Authenticate the request with the configured bearer API key.
pub fn require_api_key(auth: Arc<AuthConfig>) -> Handler {
    Handler::middleware("auth.api_key", move |mut req: Request<Body>| {
        let auth = auth.clone();
        async move {
            if !auth.enabled {
                req.extensions_mut()
                    .insert(SignedInUser::anonymous(auth.anonymous_role));
                return Flow::Next(req);
            }

            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::to_string);

            match token {
                Some(token) if !auth.api_key.is_empty() && token == auth.api_key => {
                    req.extensions_mut()
                        .insert(SignedInUser::new(auth.api_key_login.clone(), auth.api_key_role));
                    Flow::Next(req)
                }
                Some(_) => {
                    warn!(path = %req.uri().path(), "Invalid API key");
                    unauthorized("Invalid API key")
                }
                None => unauthorized("Unauthorized"),
            }
        }
    })
}

/// Reject requests whose user does not hold at least `role`.
pub fn require_role(role: Role) -> Handler {
    let name = format!("auth.role.{}", role.as_str());
    Handler::middleware(name, move |req: Request<Body>| async move {
        let user = req
            .extensions()
            .get::<SignedInUser>()
            .map(|user| (user.role.includes(role), user.login.clone()));

        match user {
            Some((true, _)) => Flow::Next(req),
            Some((false, login)) => {
                warn!(login = %login, required = role.as_str(), "Permission denied");
                Flow::respond((
                    StatusCode::FORBIDDEN,
                    Json(json!({ "message": "Permission denied" })),
                ))
            }
            None => unauthorized("Unauthorized"),
        }
    })
}

fn unauthorized(message: &str) -> Flow {
    Flow::respond((StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))))
}
