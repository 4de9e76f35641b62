//! # StreamVault Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`auth`]: credential header and session cookie names
//! - [`session`]: session store backend selection
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: listen address and user store selection
//!
//! # Example
//!
//! ```ignore
//! use streamvault_config::{AuthConfig, CorsConfig, ServerConfig, SessionConfig};
//!
//! let auth_config = AuthConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod server;
pub mod session;

pub use auth::{AuthConfig, SESSION_USER_KEY};
pub use cors::CorsConfig;
pub use server::{ServerConfig, UserStoreBackend};
pub use session::{SessionBackend, SessionConfig};
