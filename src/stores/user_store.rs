//! User lookups.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use streamvault_models::{User, UserId};
use tokio::sync::RwLock;
use tracing::instrument;

/// Why a lookup produced no user.
///
/// `NotFound` is kept apart from backend failures even though the pipeline
/// treats both as an invalid credential.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("credential matches {0} users")]
    Ambiguous(usize),

    #[error("user store error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exactly one user must hold `api_key`.
    async fn find_by_api_key(&self, api_key: &str) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError>;
}

/// PostgreSQL-backed store reading the `users` table.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip_all, fields(db.operation = "SELECT", db.sql.table = "users"))]
    async fn find_by_api_key(&self, api_key: &str) -> Result<User, StoreError> {
        // LIMIT 2 is enough to tell "one" from "more than one".
        let mut users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, role, api_key, created_at, updated_at
            FROM users
            WHERE api_key = $1
            LIMIT 2
            "#,
        )
        .bind(api_key)
        .fetch_all(&self.pool)
        .await?;

        match users.len() {
            0 => Err(StoreError::NotFound),
            1 => users.pop().ok_or(StoreError::NotFound),
            n => Err(StoreError::Ambiguous(n)),
        }
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.sql.table = "users"))]
    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, role, api_key, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

/// In-process store for local mode and tests.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl FromIterator<User> for MemoryUserStore {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let users = iter.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_api_key(&self, api_key: &str) -> Result<User, StoreError> {
        let users = self.users.read().await;
        let mut matches = users
            .values()
            .filter(|u| u.api_key.as_deref() == Some(api_key));

        match (matches.next(), matches.count()) {
            (None, _) => Err(StoreError::NotFound),
            (Some(user), 0) => Ok(user.clone()),
            (Some(_), rest) => Err(StoreError::Ambiguous(rest + 1)),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
