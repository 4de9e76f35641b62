//! Authentication configuration.
//!
//! # Environment Variables
//!
//! - `API_KEY_HEADER`: header carrying the API key (default: `X-API-Key`)
//! - `SESSION_COOKIE_NAME`: cookie carrying the session token (default: `session`)

use std::env;

/// Session key holding the authenticated user's id. Fixed; not configurable.
pub const SESSION_USER_KEY: &str = "user_id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub api_key_header: String,
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key_header: "X-API-Key".to_string(),
            session_cookie: "session".to_string(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key_header: non_empty_var("API_KEY_HEADER").unwrap_or(defaults.api_key_header),
            session_cookie: non_empty_var("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session_cookie),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
