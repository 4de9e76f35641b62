//! Server-side sessions.
//!
//! A session is addressed by the opaque token in the session cookie. The
//! pipeline only ever reads from it; writes happen in the login flow, which
//! lives outside this crate.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use streamvault_config::SessionConfig;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session backend error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Value stored under `key` in the request's session, if the request
    /// carries a session and the key is set.
    async fn get(&self, parts: &Parts, key: &str) -> Result<Option<String>, SessionError>;
}

fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Sessions held in process memory.
#[derive(Debug)]
pub struct MemorySessionStore {
    cookie_name: String,
    sessions: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, token: &str, key: &str, value: impl Into<String>) {
        self.sessions
            .write()
            .await
            .entry(token.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    pub async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, parts: &Parts, key: &str) -> Result<Option<String>, SessionError> {
        let Some(token) = session_token(parts, &self.cookie_name) else {
            return Ok(None);
        };

        Ok(self
            .sessions
            .read()
            .await
            .get(&token)
            .and_then(|values| values.get(key))
            .cloned())
    }
}

/// Sessions stored as Redis hashes, one hash per token.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    cookie_name: String,
    config: SessionConfig,
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("cookie_name", &self.cookie_name)
            .field("key_prefix", &self.config.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisSessionStore {
    pub async fn new(
        config: SessionConfig,
        cookie_name: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let client = Client::open(config.redis_url.as_str())?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self {
            conn,
            cookie_name: cookie_name.into(),
            config,
        })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip_all, fields(session.key = %key, cache.operation = "HGET"))]
    async fn get(&self, parts: &Parts, key: &str) -> Result<Option<String>, SessionError> {
        let Some(token) = session_token(parts, &self.cookie_name) else {
            return Ok(None);
        };

        let mut conn = self.conn.clone();
        let value: Option<String> = conn.hget(self.config.session_key(&token), key).await?;

        debug!(found = value.is_some(), "Session lookup");

        Ok(value)
    }
}
