use axum::Json;
use serde::Serialize;
use streamvault_models::User;
use tracing::instrument;

use crate::middleware::{AuthMethod, CurrentUser};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub auth_method: AuthMethod,
}

/// The caller's own user record and how they authenticated.
#[instrument(skip_all, fields(user.id = %current.user.id))]
pub async fn get_me(current: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: current.user.as_ref().clone(),
        auth_method: current.method,
    })
}
