//! Per-request authentication state.
//!
//! [`AuthContext`] lives in the request's extensions. The credential stage
//! inserts it, the resolver fills in the user, and handlers read it through
//! [`CurrentUser`].

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use streamvault_models::User;

use crate::utils::errors::AuthError;

/// How the caller presented their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    ApiKey,
    Session,
    None,
}

impl AuthMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            AuthMethod::ApiKey => "api_key",
            AuthMethod::Session => "session",
            AuthMethod::None => "none",
        }
    }
}

/// A raw, not yet verified credential tagged with the method that produced it.
#[derive(Clone, PartialEq, Eq)]
pub enum IdentityReference {
    /// Header value, verbatim.
    ApiKey(String),
    /// The session's `user_id` value, not yet parsed.
    Session(String),
    /// An API key header whose bytes are not UTF-8. Still an API key
    /// attempt, but no user can hold it.
    UnreadableApiKey,
}

impl IdentityReference {
    pub fn method(&self) -> AuthMethod {
        match self {
            IdentityReference::ApiKey(_) | IdentityReference::UnreadableApiKey => {
                AuthMethod::ApiKey
            }
            IdentityReference::Session(_) => AuthMethod::Session,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            IdentityReference::ApiKey(v) | IdentityReference::Session(v) => v,
            IdentityReference::UnreadableApiKey => "",
        }
    }
}

// API keys are secrets; keep them out of logs.
impl std::fmt::Debug for IdentityReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityReference::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            IdentityReference::Session(id) => f.debug_tuple("Session").field(id).finish(),
            IdentityReference::UnreadableApiKey => f.write_str("UnreadableApiKey"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthContext {
    reference: Option<IdentityReference>,
    user: Option<Arc<User>>,
}

impl AuthContext {
    pub fn new(reference: Option<IdentityReference>) -> Self {
        Self {
            reference,
            user: None,
        }
    }

    pub fn method(&self) -> AuthMethod {
        self.reference
            .as_ref()
            .map_or(AuthMethod::None, IdentityReference::method)
    }

    pub fn reference(&self) -> Option<&IdentityReference> {
        self.reference.as_ref()
    }

    pub fn user(&self) -> Option<&Arc<User>> {
        self.user.as_ref()
    }

    pub(crate) fn set_user(&mut self, user: Arc<User>) {
        self.user = Some(user);
    }
}

/// Extractor for the user resolved by the authentication pipeline.
///
/// Only valid on routes wrapped with `require_auth` or `require_role`.
/// Anywhere else there is no resolved user and extraction is rejected.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: Arc<User>,
    pub method: AuthMethod,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<AuthContext>().ok_or_else(|| {
            tracing::error!("CurrentUser extracted on a route without the auth pipeline");
            AuthError::InvalidCredential
        })?;

        let user = ctx.user().cloned().ok_or_else(|| {
            tracing::error!("CurrentUser extracted before identity resolution");
            AuthError::InvalidCredential
        })?;

        Ok(CurrentUser {
            user,
            method: ctx.method(),
        })
    }
}
