#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, header, request::Parts};
use http_body_util::BodyExt;
use streamvault::state::AppState;
use streamvault::stores::{
    MemorySessionStore, MemoryUserStore, SessionError, SessionStore, StoreError, UserStore,
};
use streamvault_config::{AuthConfig, CorsConfig, SESSION_USER_KEY};
use streamvault_models::{Role, User, UserId};

/// Well-known fixture users
pub mod fixtures {
    use streamvault_models::UserId;

    pub const EDITOR_ID: UserId = UserId::from_u128(0xe0000000_0000_0000_0000_000000000001);
    pub const EDITOR_KEY: &str = "abc123";
    pub const EDITOR_SESSION: &str = "editor-session-token";

    pub const VIEWER_ID: UserId = UserId::from_u128(0xa0000000_0000_0000_0000_000000000002);
    pub const VIEWER_KEY: &str = "viewer-key";
    pub const VIEWER_SESSION: &str = "viewer-session-token";

    pub const ADMIN_ID: UserId = UserId::from_u128(0xd0000000_0000_0000_0000_000000000003);
    pub const ADMIN_KEY: &str = "admin-key";

    /// Session whose `user_id` is a valid UUID with no matching user.
    pub const GHOST_SESSION: &str = "ghost-session-token";
    pub const GHOST_USER_ID: &str = "11111111-1111-1111-1111-111111111111";

    /// Session whose `user_id` is not a UUID at all.
    pub const MALFORMED_SESSION: &str = "malformed-session-token";
}

/// Wraps the in-memory store and counts lookups, so tests can assert a
/// lookup never happened.
#[derive(Debug, Default)]
pub struct CountingUserStore {
    inner: MemoryUserStore,
    lookups: AtomicUsize,
}

impl CountingUserStore {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn insert(&self, user: User) {
        self.inner.insert(user).await;
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl UserStore for CountingUserStore {
    async fn find_by_api_key(&self, api_key: &str) -> Result<User, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_api_key(api_key).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }
}

/// A user store whose database is unreachable.
#[derive(Debug, Default)]
pub struct FailingUserStore {
    lookups: AtomicUsize,
}

impl FailingUserStore {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_api_key(&self, _api_key: &str) -> Result<User, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: UserId) -> Result<User, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// A session store whose backend is down.
#[derive(Debug, Default)]
pub struct FailingSessionStore {
    reads: AtomicUsize,
}

impl FailingSessionStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn get(&self, _parts: &Parts, _key: &str) -> Result<Option<String>, SessionError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(SessionError::Redis(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        ))))
    }
}

pub fn app_state(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>) -> AppState {
    AppState::new(
        AuthConfig::default(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        users,
        sessions,
    )
}

pub struct TestApp {
    pub state: AppState,
    pub users: Arc<CountingUserStore>,
    pub sessions: Arc<MemorySessionStore>,
}

pub async fn setup_test_app() -> TestApp {
    use fixtures::*;

    let auth_config = AuthConfig::default();
    let users = Arc::new(CountingUserStore::default());
    let sessions = Arc::new(MemorySessionStore::new(auth_config.session_cookie.clone()));

    users
        .insert(User::new(EDITOR_ID, "editor", Role::Editor).with_api_key(EDITOR_KEY))
        .await;
    users
        .insert(User::new(VIEWER_ID, "viewer", Role::User).with_api_key(VIEWER_KEY))
        .await;
    users
        .insert(User::new(ADMIN_ID, "admin", Role::Admin).with_api_key(ADMIN_KEY))
        .await;

    sessions
        .insert(EDITOR_SESSION, SESSION_USER_KEY, EDITOR_ID.to_string())
        .await;
    sessions
        .insert(VIEWER_SESSION, SESSION_USER_KEY, VIEWER_ID.to_string())
        .await;
    sessions
        .insert(GHOST_SESSION, SESSION_USER_KEY, GHOST_USER_ID)
        .await;
    sessions
        .insert(MALFORMED_SESSION, SESSION_USER_KEY, "not-a-uuid")
        .await;

    let state = app_state(users.clone(), sessions.clone());

    TestApp {
        state,
        users,
        sessions,
    }
}

pub fn get_request(uri: &str, api_key: Option<&str>, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, format!("session={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
