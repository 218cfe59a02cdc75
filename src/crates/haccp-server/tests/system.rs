mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use haccp_server::config::ServerConfig;

#[tokio::test]
async fn test_eik_check_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/v1/eik/831641791", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert!(body["data"]["reason"].is_null());

    let (_, body) = app.request(Method::GET, "/api/v1/eik/831641790", None, None).await;
    assert_eq!(body["data"]["valid"], false);
    assert!(body["data"]["reason"].is_string());

    let (_, body) = app.request(Method::GET, "/api/v1/eik/12AB", None, None).await;
    assert_eq!(body["data"]["valid"], false);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = app.request(Method::GET, "/api/v1/system/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "haccp-server");
    assert_eq!(body["database"]["connected"], true);
}

#[tokio::test]
async fn test_unknown_route_and_malformed_json() {
    let app = TestApp::new().await;

    let (status, _) = app.request(Method::GET, "/api/v1/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/businesses",
            Some(&app.admin_token),
            Some(serde_json::json!({ "name": "No EIK" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].is_string());
}

#[test]
fn test_sample_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../config/haccp-server.example.toml");
    let config = ServerConfig::from_file(path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.logbook.slots, vec!["10:00", "17:00"]);
    assert_eq!(config.logbook.backfill_days, 15);
}
