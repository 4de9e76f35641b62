use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Terminal failure of the authentication pipeline.
///
/// Both variants answer 403: a caller without a usable credential and a
/// caller whose role is too low get the same status on the wire, only the
/// message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No credential, a malformed one, or one that resolves to no user.
    #[error("invalid access token")]
    InvalidCredential,
    /// The user was resolved but their role is below the route's requirement.
    #[error("unauthorized")]
    Unauthorized,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_both_variants_are_forbidden() {
        assert_eq!(AuthError::InvalidCredential.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Unauthorized.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_error_body() {
        let response = AuthError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "unauthorized");
    }
}
