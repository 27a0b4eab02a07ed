//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Route handler chain:
//!     → access_control.rs require_api_key (attach SignedInUser)
//!     → access_control.rs require_role (check role from extensions)
//!     → endpoint
//! ```
//!
//! # Design Decisions
//! - Checks are ordinary chain handlers, attached per group
//! - Fail closed: missing identity is 401, insufficient role is 403
//! - No trust in client input

pub mod access_control;
pub mod identity;

pub use access_control::{require_api_key, require_role};
pub use identity::{Role, SignedInUser};
