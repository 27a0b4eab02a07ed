//! Handler chains executed by bound routes.
//!
//! # Data Flow
//! ```text
//! axum request
//!     → Chain::run
//!     → handler 1 → Flow::Next(req) → handler 2 → ... → Flow::Respond(res)
//!     → response (first Respond wins)
//! ```
//!
//! Middleware pass request-scoped values to later handlers through request
//! extensions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};

/// Outcome of one handler.
pub enum Flow {
    /// Hand the request to the next handler in the chain.
    Next(Request<Body>),
    /// Stop the chain and send this response.
    Respond(Response),
}

impl Flow {
    pub fn respond(response: impl IntoResponse) -> Self {
        Flow::Respond(response.into_response())
    }
}

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Flow> + Send + Sync;

/// A named unit of request processing.
#[derive(Clone)]
pub struct Handler {
    name: Arc<str>,
    f: Arc<HandlerFn>,
}

impl Handler {
    /// Handler that may continue the chain or answer early.
    pub fn middleware<F, Fut>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Flow> + Send + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(move |req| f(req).boxed()),
        }
    }

    /// Terminal handler; always answers.
    pub fn endpoint<F, Fut, R>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self::middleware(name, move |req| {
            let fut = f(req);
            async move { Flow::Respond(fut.await.into_response()) }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn call(&self, req: Request<Body>) -> Flow {
        (self.f)(req).await
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.name).finish()
    }
}

/// Ordered handlers of one route.
#[derive(Clone, Debug)]
pub struct Chain {
    pattern: Arc<str>,
    handlers: Arc<[Handler]>,
}

impl Chain {
    pub fn new(pattern: impl Into<Arc<str>>, handlers: Vec<Handler>) -> Self {
        Self {
            pattern: pattern.into(),
            handlers: handlers.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name().to_string()).collect()
    }

    /// Run handlers in order until one responds.
    pub async fn run(&self, mut req: Request<Body>) -> Response {
        for handler in self.handlers.iter() {
            match handler.call(req).await {
                Flow::Next(next) => req = next,
                Flow::Respond(response) => return response,
            }
        }

        tracing::warn!(
            pattern = %self.pattern,
            path = %req.uri().path(),
            handlers = self.handlers.len(),
            "Handler chain finished without a response"
        );
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct Marker(&'static str);

    fn request() -> Request<Body> {
        Request::builder().uri("/test").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_first_response_wins() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();

        let chain = Chain::new(
            "/test",
            vec![
                Handler::middleware("deny", |_req| async { Flow::respond(StatusCode::FORBIDDEN) }),
                Handler::endpoint("never", move |_req| {
                    c.fetch_add(1, Ordering::SeqCst);
                    async { "unreachable" }
                }),
            ],
        );

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extensions_flow_down_the_chain() {
        let chain = Chain::new(
            "/test",
            vec![
                Handler::middleware("mark", |mut req: Request<Body>| async move {
                    req.extensions_mut().insert(Marker("set-by-middleware"));
                    Flow::Next(req)
                }),
                Handler::endpoint("read", |req: Request<Body>| async move {
                    match req.extensions().get::<Marker>() {
                        Some(m) => (StatusCode::OK, m.0).into_response(),
                        None => StatusCode::BAD_REQUEST.into_response(),
                    }
                }),
            ],
        );

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chain_without_response_is_server_error() {
        let chain = Chain::new(
            "/test",
            vec![Handler::middleware("pass", |req| async move { Flow::Next(req) })],
        );

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_names_in_order() {
        let chain = Chain::new(
            "/test",
            vec![
                Handler::middleware("auth", |req| async move { Flow::Next(req) }),
                Handler::endpoint("get", |_req| async { "ok" }),
            ],
        );
        assert_eq!(chain.names(), vec!["auth", "get"]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.pattern(), "/test");
    }
}
