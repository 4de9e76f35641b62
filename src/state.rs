use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use sqlx::PgPool;
use streamvault_config::{
    AuthConfig, CorsConfig, ServerConfig, SessionBackend, SessionConfig, UserStoreBackend,
};
use tracing::{info, warn};

use crate::stores::{
    MemorySessionStore, MemoryUserStore, PgUserStore, RedisSessionStore, SessionStore, UserStore,
};

/// Shared by every request. The stores are read-only from here on.
#[derive(Clone)]
pub struct AppState {
    pub auth_config: AuthConfig,
    pub cors_config: CorsConfig,
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        auth_config: AuthConfig,
        cors_config: CorsConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            auth_config,
            cors_config,
            users,
            sessions,
            started_at: Instant::now(),
        }
    }
}

pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let auth_config = AuthConfig::from_env();
    let session_config = SessionConfig::from_env();

    let users: Arc<dyn UserStore> = match server_config.user_store {
        UserStoreBackend::Postgres => {
            let url = server_config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when USER_STORE=postgres")?;
            let pool = PgPool::connect(url)
                .await
                .context("Failed to connect to database")?;
            info!("Using PostgreSQL user store");
            Arc::new(PgUserStore::new(pool))
        }
        UserStoreBackend::Memory => {
            warn!("Using in-memory user store, no users are provisioned");
            Arc::new(MemoryUserStore::new())
        }
    };

    let sessions: Arc<dyn SessionStore> = match session_config.backend {
        SessionBackend::Redis => {
            let store =
                RedisSessionStore::new(session_config.clone(), auth_config.session_cookie.clone())
                    .await
                    .context("Failed to connect to Redis session store")?;
            info!(redis_url = %session_config.redis_url, "Using Redis session store");
            Arc::new(store)
        }
        SessionBackend::Memory => {
            info!("Using in-memory session store");
            Arc::new(MemorySessionStore::new(auth_config.session_cookie.clone()))
        }
    };

    Ok(AppState::new(
        auth_config,
        CorsConfig::from_env(),
        users,
        sessions,
    ))
}
