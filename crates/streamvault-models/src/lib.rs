//! # StreamVault Models
//!
//! Domain types shared by the StreamVault authentication layer.
//!
//! - [`ids`]: strongly-typed identifiers
//! - [`roles`]: the fixed role hierarchy used by route gates
//! - [`users`]: the user record resolved for each authenticated request
//!
//! # Example
//!
//! ```ignore
//! use streamvault_models::{Role, User};
//!
//! if user.role.satisfies(Role::Editor) {
//!     // editor-level operation
//! }
//! ```

pub mod ids;
pub mod roles;
pub mod users;

pub use ids::UserId;
pub use roles::{ParseRoleError, Role};
pub use users::User;
