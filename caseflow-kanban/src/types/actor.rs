//! The acting user, passed explicitly to every operation

use super::ids::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the acting user.
///
/// Staff and admins may act on containers they do not own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Member,
    Staff,
    Admin,
}

impl Role {
    /// Whether this role bypasses per-owner checks
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }
}

/// Who is performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    #[serde(default)]
    pub role: Role,
}

impl Actor {
    /// A regular member
    pub fn member(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Member,
        }
    }

    /// A staff user
    pub fn staff(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Staff,
        }
    }

    /// An administrator
    pub fn admin(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    /// Whether this actor may act on something owned by `owner`
    pub fn may_act_for(&self, owner: UserId) -> bool {
        self.role.is_privileged() || self.user_id == owner
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Role::Member => write!(f, "user:{}", self.user_id),
            Role::Staff => write!(f, "user:{} (staff)", self.user_id),
            Role::Admin => write!(f, "user:{} (admin)", self.user_id),
        }
    }
}
