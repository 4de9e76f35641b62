//! User records as seen by the authentication layer.
//!
//! Users are owned by the external user store. This layer only reads them,
//! so there are no create/update DTOs here.

use crate::ids::UserId;
use crate::roles::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user in the system.
///
/// The API key is never serialized into responses, and `Debug` redacts it.
#[derive(Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Build a user with fresh timestamps; handy for fixtures and seeding.
    pub fn new(id: UserId, username: impl Into<String>, role: Role) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            username: username.into(),
            role,
            api_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
