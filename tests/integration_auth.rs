mod common;

use axum::http::StatusCode;
use common::fixtures::*;
use common::{body_json, get_request, setup_test_app};
use streamvault::router::init_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_is_public() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(app.users.lookups(), 0);
}

#[tokio::test]
async fn test_me_with_api_key() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/auth/me", Some(EDITOR_KEY), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["auth_method"], "api_key");
    assert_eq!(body["user"]["id"], EDITOR_ID.to_string());
    assert_eq!(body["user"]["username"], "editor");
    assert_eq!(body["user"]["role"], "editor");
    assert!(body["user"].get("api_key").is_none());
}

#[tokio::test]
async fn test_me_with_session() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/auth/me", None, Some(VIEWER_SESSION)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["auth_method"], "session");
    assert_eq!(body["user"]["username"], "viewer");
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn test_me_without_credentials() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/auth/me", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid access token");
}

#[tokio::test]
async fn test_me_with_unknown_api_key() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/auth/me", Some("nope"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid access token");
    assert_eq!(app.users.lookups(), 1);
}

#[tokio::test]
async fn test_admin_info_allows_admin() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/admin/info", Some(ADMIN_KEY), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_admin_info_denies_editor() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/admin/info", Some(EDITOR_KEY), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_admin_info_denies_user_session() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/admin/info", None, Some(VIEWER_SESSION)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let response = router
        .oneshot(get_request("/api/v1/nope", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_test_app().await;
    let router = init_router(app.state.clone());

    let mut request = get_request("/health", None, None);
    request
        .headers_mut()
        .insert("x-request-id", "req-42".parse().unwrap());
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");

    // generated when absent, also on rejections
    let response = router
        .oneshot(get_request("/api/v1/auth/me", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().contains_key("x-request-id"));
}
