use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::RouterAuthExt;
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::init_auth_router;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use streamvault_models::Role;
use tower_http::cors::{AllowHeaders, CorsLayer};

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", init_auth_router().require_auth(&state))
                .nest(
                    "/admin",
                    init_admin_router().require_role(&state, Role::Admin),
                ),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut allowed_headers = vec![
        axum::http::header::CONTENT_TYPE,
        axum::http::header::ACCEPT,
    ];
    if let Ok(api_key_header) = HeaderName::try_from(state.auth_config.api_key_header.as_str()) {
        allowed_headers.push(api_key_header);
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::list(allowed_headers))
        .allow_credentials(true)
}
