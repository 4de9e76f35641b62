//! Third pipeline stage: compare the resolved user's role with the route's
//! required role.
//!
//! The required role is the middleware state, fixed when the route is
//! registered:
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use streamvault::middleware::role::require_role;
//! use streamvault_models::Role;
//!
//! let editor_routes = Router::new()
//!     .route("/videos/{id}", delete(delete_video))
//!     .route_layer(middleware::from_fn_with_state(Role::Editor, require_role));
//! ```
//!
//! It must run after [`resolve_identity`](crate::middleware::resolver::resolve_identity);
//! [`RouterAuthExt`](crate::middleware::RouterAuthExt) wires the stages in
//! the right order.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use streamvault_models::Role;
use tracing::{debug, error};

use crate::metrics::track_role_check;
use crate::middleware::context::AuthContext;
use crate::utils::errors::AuthError;

pub async fn require_role(
    State(required): State<Role>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(user) = req.extensions().get::<AuthContext>().and_then(AuthContext::user) else {
        // Ordering defect: deny rather than run the handler without a user.
        error!(required = %required, "Role gate reached without a resolved user");
        return Err(AuthError::InvalidCredential);
    };

    let decision = check_role_hierarchy(user.role, required);
    track_role_check(required.as_str(), decision.is_ok());

    if decision.is_err() {
        debug!(
            user.id = %user.id,
            role = %user.role,
            required = %required,
            "Role check failed"
        );
    }
    decision?;

    Ok(next.run(req).await)
}

/// Grant iff `user_role` ranks at or above `required`.
pub fn check_role_hierarchy(user_role: Role, required: Role) -> Result<(), AuthError> {
    if user_role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}
