//! First pipeline stage: find out how the caller identifies themselves.
//!
//! No user lookup happens here and nothing is rejected. A request without
//! any credential continues with [`AuthMethod::None`] and is turned away by
//! the resolver.

use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use streamvault_config::SESSION_USER_KEY;
use tracing::{debug, warn};

use crate::middleware::context::{AuthContext, AuthMethod, IdentityReference};
use crate::state::AppState;

pub async fn extract_credentials(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let reference = identify(&state, &parts).await;
    let ctx = AuthContext::new(reference);
    debug!(auth.method = ctx.method().as_str(), "Credentials extracted");
    parts.extensions.insert(ctx);

    next.run(Request::from_parts(parts, body)).await
}

/// API key header first; the session is only consulted when no usable key
/// was sent.
pub async fn identify(state: &AppState, parts: &Parts) -> Option<IdentityReference> {
    if let Some(reference) = api_key_header(parts, &state.auth_config.api_key_header) {
        return Some(reference);
    }

    match state.sessions.get(parts, SESSION_USER_KEY).await {
        Ok(Some(user_id)) => Some(IdentityReference::Session(user_id)),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Session lookup failed, continuing without a session");
            None
        }
    }
}

/// Any non-empty header value selects the API key path. The value is kept
/// verbatim; bytes that are not UTF-8 still count as a key, one that can
/// never match a user.
fn api_key_header(parts: &Parts, header_name: &str) -> Option<IdentityReference> {
    let raw = parts.headers.get(header_name)?.as_bytes();
    if raw.is_empty() {
        return None;
    }

    Some(match std::str::from_utf8(raw) {
        Ok(key) => IdentityReference::ApiKey(key.to_string()),
        Err(_) => IdentityReference::UnreadableApiKey,
    })
}
