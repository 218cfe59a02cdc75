mod common;

use axum::http::{Method, StatusCode};
use common::{test_config, TestApp, CRON_SECRET, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn test_first_account_is_admin() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/auth/me", &app.admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("password_hash").is_none());

    let (token, _) = app.register("owner@example.bg").await;
    let (_, body) = app.get("/api/v1/auth/me", &token).await;
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_first_registrations_yield_one_admin() {
    let app = TestApp::without_accounts(test_config(Some(CRON_SECRET))).await;

    let (first, second, third) = tokio::join!(
        app.register("first@example.bg"),
        app.register("second@example.bg"),
        app.register("third@example.bg"),
    );

    let mut roles = Vec::new();
    for (token, _) in [first, second, third] {
        let (status, body) = app.get("/api/v1/auth/me", &token).await;
        assert_eq!(status, StatusCode::OK);
        roles.push(body["data"]["role"].as_str().unwrap().to_string());
    }
    roles.sort();
    assert_eq!(roles, vec!["admin", "user", "user"]);
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "owner@example.bg", "password": "short", "full_name": "Owner" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    app.register("owner@example.bg").await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "OWNER@example.bg", "password": PASSWORD, "full_name": "Owner" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    app.register("owner@example.bg").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": " Owner@Example.bg", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 86400);

    let token = body["data"]["token"].as_str().unwrap();
    let (status, _) = app.get("/api/v1/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "owner@example.bg", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_required() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/v1/businesses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.get("/api/v1/businesses", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_disabled_account_is_refused() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("owner@example.bg").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/admin/users/{user_id}"),
            &app.admin_token,
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (status, body) = app.get("/api/v1/auth/me", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "owner@example.bg", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new().await;
    let (token, _) = app.register("owner@example.bg").await;

    let (status, _) = app.get("/api/v1/admin/users", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/api/v1/admin/users", &app.admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (status, body) = app.get("/api/v1/admin/stats", &app.admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"], 2);
    assert_eq!(body["data"]["businesses"], 0);
}

#[tokio::test]
async fn test_admin_cannot_demote_self() {
    let app = TestApp::new().await;
    let (_, body) = app.get("/api/v1/auth/me", &app.admin_token).await;
    let admin_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/api/v1/admin/users/{admin_id}"),
            &app.admin_token,
            json!({ "role": "user" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
