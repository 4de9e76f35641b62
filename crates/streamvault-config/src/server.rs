//! Listener and user store configuration.
//!
//! # Environment Variables
//!
//! - `HOST` (default: `0.0.0.0`) and `PORT` (default: `4000`)
//! - `USER_STORE`: `postgres` or `memory` (default: `postgres`)
//! - `DATABASE_URL`: PostgreSQL connection string, required for the `postgres` store

use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserStoreBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub user_store: UserStoreBackend,
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let user_store = match env::var("USER_STORE").as_deref() {
            Ok("memory") => UserStoreBackend::Memory,
            _ => UserStoreBackend::Postgres,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            user_store,
            database_url: env::var("DATABASE_URL").ok(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
