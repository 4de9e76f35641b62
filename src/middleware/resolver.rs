//! Second pipeline stage: turn the extracted credential into a user.
//!
//! Every failure here is an [`AuthError::InvalidCredential`]. Store errors
//! are logged with their detail but never leak into the response.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use streamvault_models::{User, UserId};
use tracing::{debug, error};

use crate::metrics::track_auth_attempt;
use crate::middleware::context::{AuthContext, IdentityReference};
use crate::state::AppState;
use crate::stores::{StoreError, UserStore};
use crate::utils::errors::AuthError;

pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(ctx) = req.extensions_mut().get_mut::<AuthContext>() else {
        error!("Identity resolver ran without extracted credentials");
        return Err(AuthError::InvalidCredential);
    };

    let method = ctx.method();
    let result = match ctx.reference() {
        Some(reference) => resolve_reference(state.users.as_ref(), reference).await,
        None => {
            debug!("Request carries no credential");
            Err(AuthError::InvalidCredential)
        }
    };

    track_auth_attempt(method.as_str(), result.is_ok());
    let user = result?;

    debug!(user.id = %user.id, auth.method = method.as_str(), "Identity resolved");
    ctx.set_user(Arc::new(user));

    Ok(next.run(req).await)
}

pub async fn resolve_reference(
    users: &dyn UserStore,
    reference: &IdentityReference,
) -> Result<User, AuthError> {
    match reference {
        IdentityReference::ApiKey(key) => users
            .find_by_api_key(key)
            .await
            .map_err(|e| lookup_failed(e, "invalid api key")),
        IdentityReference::UnreadableApiKey => {
            debug!("API key header is not valid UTF-8");
            Err(AuthError::InvalidCredential)
        }
        IdentityReference::Session(raw_id) => {
            let id = UserId::parse(raw_id).map_err(|e| {
                error!(error = %e, "Session user id is not a valid UUID");
                AuthError::InvalidCredential
            })?;

            users
                .find_by_id(id)
                .await
                .map_err(|e| lookup_failed(e, "session user not found"))
        }
    }
}

fn lookup_failed(err: StoreError, msg: &'static str) -> AuthError {
    match err {
        StoreError::NotFound => debug!("{msg}"),
        StoreError::Ambiguous(n) => error!(matches = n, "{msg}: credential is not unique"),
        StoreError::Database(e) => error!(error = %e, "{msg}: user store unavailable"),
    }
    AuthError::InvalidCredential
}
