//! Authentication and authorization pipeline.
//!
//! Every protected request passes three stages, in this order:
//!
//! 1. [`credentials`]: pick up the `X-API-Key` header or the session's
//!    `user_id`, store the tagged reference in an [`AuthContext`]
//! 2. [`resolver`]: look the reference up in the user store, attach the user
//! 3. [`role`]: compare the user's role with the route's required role
//!
//! Any stage may end the request with a 403; the handler only runs when all
//! three pass. Handlers read the result through the [`CurrentUser`]
//! extractor.
//!
//! # Example
//!
//! ```ignore
//! use streamvault::middleware::{CurrentUser, RouterAuthExt};
//! use streamvault_models::Role;
//!
//! async fn archive_channel(CurrentUser { user, .. }: CurrentUser) -> impl IntoResponse {
//!     // only archivers, editors and admins get here
//! }
//!
//! let archive_routes = Router::new()
//!     .route("/archive", post(archive_channel))
//!     .require_role(&state, Role::Archiver);
//! ```

pub mod context;
pub mod credentials;
pub mod resolver;
pub mod role;

use axum::{Router, middleware::from_fn_with_state};
use streamvault_models::Role;

use crate::state::AppState;

pub use context::{AuthContext, AuthMethod, CurrentUser, IdentityReference};
pub use credentials::extract_credentials;
pub use resolver::resolve_identity;
pub use role::{check_role_hierarchy, require_role};

/// Installs the pipeline on every route of a router.
///
/// `route_layer` wraps what is already there, so the stages are added
/// innermost first.
pub trait RouterAuthExt {
    /// Any resolved user passes.
    fn require_auth(self, state: &AppState) -> Self;

    /// Only users ranking at or above `required` pass.
    fn require_role(self, state: &AppState, required: Role) -> Self;
}

impl<S> RouterAuthExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn require_auth(self, state: &AppState) -> Self {
        self.route_layer(from_fn_with_state(state.clone(), resolve_identity))
            .route_layer(from_fn_with_state(state.clone(), extract_credentials))
    }

    fn require_role(self, state: &AppState, required: Role) -> Self {
        self.route_layer(from_fn_with_state(required, require_role))
            .require_auth(state)
    }
}
