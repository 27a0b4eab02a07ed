//! Request identity types.

use serde::{Deserialize, Serialize};

/// Organization role, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    /// Whether this role grants at least `required`.
    pub fn includes(self, required: Role) -> bool {
        self >= required
    }
}

/// Identity attached to a request by the authentication middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInUser {
    pub login: String,
    pub role: Role,
    pub is_anonymous: bool,
}

impl SignedInUser {
    pub fn new(login: impl Into<String>, role: Role) -> Self {
        Self {
            login: login.into(),
            role,
            is_anonymous: false,
        }
    }

    pub fn anonymous(role: Role) -> Self {
        Self {
            login: "anonymous".to_string(),
            role,
            is_anonymous: true,
        }
    }
}
