//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, global layers)
//!     → request.rs (add request ID)
//!     → bound route (routing::handler::Chain)
//!     → response.rs (shared error bodies, 404 fallback)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use server::{HttpServer, ServerError, API_PREFIX};
