//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     feature modules
//!     → register.rs (RouteRegister: get/post/.../group)
//!     → route tree (prefix + inherited handlers per node)
//!
//! Flattening (once):
//!     RouteRegister::register(router)
//!     → depth-first walk, registration order
//!     → binder.rs (AxumRouter: pattern.rs translation, Chain per route)
//!     → immutable axum::Router + route table
//!
//! Per request:
//!     axum match → handler.rs (Chain::run, first response wins)
//! ```
//!
//! # Design Decisions
//! - The tree is only a builder; requests never touch it
//! - Handler chains compose by concatenation down the tree
//! - The core is generic over the handler type; only the binder knows axum

pub mod binder;
pub mod handler;
pub mod pattern;
pub mod register;
pub mod route;

pub use binder::{AxumRouter, RouteInfo};
pub use handler::{Chain, Flow, Handler};
pub use register::{NamedMiddleware, RouteRegister, Router};
pub use route::{Method, Route};
