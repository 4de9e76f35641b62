//! Session store configuration.
//!
//! # Environment Variables
//!
//! - `SESSION_BACKEND`: `memory` or `redis` (default: `memory`)
//! - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
//! - `SESSION_KEY_PREFIX`: prefix of the per-session Redis hash (default: `streamvault:session`)

use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

impl SessionBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    pub redis_url: String,
    pub key_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "streamvault:session".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("SESSION_BACKEND")
                .ok()
                .and_then(|v| SessionBackend::parse(&v))
                .unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env::var("SESSION_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }

    /// Redis key of the hash holding one session's values.
    pub fn session_key(&self, token: &str) -> String {
        format!("{}:{}", self.key_prefix, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!(SessionBackend::parse("redis"), Some(SessionBackend::Redis));
        assert_eq!(SessionBackend::parse(" Memory "), Some(SessionBackend::Memory));
        assert_eq!(SessionBackend::parse("postgres"), None);
    }

    #[test]
    fn test_session_key() {
        let config = SessionConfig::default();
        assert_eq!(config.session_key("abc"), "streamvault:session:abc");
    }
}
