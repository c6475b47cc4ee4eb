//! Roles, users and the authenticated session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level attached to every user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl Role {
    /// Numeric rank used for the permission comparison
    fn rank(self) -> u8 {
        match self {
            Role::Admin => 3,
            Role::Editor => 2,
            Role::Viewer => 1,
        }
    }

    /// Returns true iff this role is at least as privileged as `required`
    pub fn allows(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Cycle to the next role (used by the role picker in the user form)
    pub fn next(self) -> Self {
        match self {
            Role::Admin => Role::Editor,
            Role::Editor => Role::Viewer,
            Role::Viewer => Role::Admin,
        }
    }
}

/// A user account managed through the Users view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// An authenticated session; every session maps to exactly one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Permission check against an optional session; no session means no access
pub fn permitted(session: Option<&Session>, required: Role) -> bool {
    session.is_some_and(|s| s.role().allows(required))
}
