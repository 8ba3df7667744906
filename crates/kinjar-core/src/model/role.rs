//! Global and tenant-scoped roles.
//!
//! The two role families are kept as separate types and composed in
//! [`crate::visibility::Viewer`]; there is no flattened role string.

use serde::{Deserialize, Serialize};

/// Cross-tenant role carried by a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalRole {
    Root,
    #[default]
    User,
}

impl GlobalRole {
    pub fn is_root(self) -> bool {
        matches!(self, GlobalRole::Root)
    }
}

/// Role of a user inside one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Owner,
    Admin,
    Adult,
    Child,
    Viewer,
}

impl MemberRole {
    /// OWNER and ADMIN: see time-capsule posts early and manage members.
    pub fn is_privileged(self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemberRole::Owner => "OWNER",
            MemberRole::Admin => "ADMIN",
            MemberRole::Adult => "ADULT",
            MemberRole::Child => "CHILD",
            MemberRole::Viewer => "VIEWER",
        }
    }
}
