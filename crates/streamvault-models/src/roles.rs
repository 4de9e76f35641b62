//! The role hierarchy.
//!
//! Roles form a fixed total order, lowest to highest privilege:
//!
//! ```text
//! User < Archiver < Editor < Admin
//! ```
//!
//! A route gated at some role admits that role and every role above it. The
//! order is a policy constant of this crate and is never read from storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Archiver,
    Editor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Archiver, Role::Editor, Role::Admin];

    /// Position in the hierarchy (higher number = more privileges).
    pub const fn rank(self) -> u8 {
        match self {
            Role::User => 0,
            Role::Archiver => 1,
            Role::Editor => 2,
            Role::Admin => 3,
        }
    }

    /// Whether a holder of `self` may access something that requires `required`.
    pub const fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Archiver => "archiver",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "archiver" => Ok(Role::Archiver),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

// Lets `sqlx::FromRow` decode the TEXT role column via `#[sqlx(try_from = "String")]`.
impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
