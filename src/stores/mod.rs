//! Read-only collaborators consulted by the authentication pipeline.
//!
//! - [`user_store`]: user lookups by API key or by id
//! - [`session_store`]: server-side session values keyed by a cookie token
//!
//! Both are injected into [`AppState`](crate::state::AppState) as trait
//! objects, so tests can swap in the in-memory implementations.

pub mod session_store;
pub mod user_store;

pub use session_store::{MemorySessionStore, RedisSessionStore, SessionError, SessionStore};
pub use user_store::{MemoryUserStore, PgUserStore, StoreError, UserStore};
