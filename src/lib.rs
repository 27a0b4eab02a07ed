//! Hierarchical route registration for an HTTP API.
//!
//! Feature modules mount endpoints on a [`RouteRegister`] tree with path
//! prefixes and middleware chains scoped by group. The tree is flattened once
//! at startup onto an axum router.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Method, Route, RouteRegister, Router};
