mod common;

use axum::http::StatusCode;
use chrono::{Days, Local};
use common::{TestApp, Tenant, EIK_A, EIK_B};
use serde_json::{json, Value};

fn in_days(days: i64) -> String {
    let today = Local::now().date_naive();
    let date = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    date.unwrap().format("%Y-%m-%d").to_string()
}

async fn hire(app: &TestApp, owner: &Tenant, name: &str, expiry: Option<String>) -> Value {
    let (status, body) = app
        .post(
            "/api/v1/personnel",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "full_name": name,
                "position": "Cook",
                "health_book_number": "HB-1001",
                "health_book_expiry": expiry
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn test_create_reports_health_book_status() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let valid = hire(&app, &owner, "Ivan Georgiev", Some(in_days(200))).await;
    assert_eq!(valid["health_book_status"], "valid");
    assert_eq!(valid["days_remaining"], 200);
    assert_eq!(valid["full_name"], "Ivan Georgiev");

    let missing = hire(&app, &owner, "Petar Ivanov", None).await;
    assert_eq!(missing["health_book_status"], "missing");
    assert!(missing["days_remaining"].is_null());

    let (status, body) = app
        .post(
            "/api/v1/personnel",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "full_name": "Bad Date",
                "position": "Cook",
                "health_book_expiry": "31.12.2099"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    hire(&app, &owner, "Valid One", Some(in_days(120))).await;
    hire(&app, &owner, "Expired One", Some(in_days(-3))).await;
    hire(&app, &owner, "Expired Two", Some(in_days(-40))).await;

    let (status, body) = app
        .get(
            &format!("/api/v1/personnel?establishment_id={}", owner.establishment_id),
            &owner.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let (_, body) = app.get("/api/v1/personnel?status=expired&per_page=1", &owner.token).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["pages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/v1/personnel?status=lapsed", &owner.token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("lapsed"), "{body}");
}

#[tokio::test]
async fn test_health_books_report() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    hire(&app, &owner, "Fine", Some(in_days(300))).await;
    hire(&app, &owner, "Soon", Some(in_days(10))).await;
    hire(&app, &owner, "Lapsed", Some(in_days(-5))).await;
    hire(&app, &owner, "No Book", None).await;
    let gone = hire(&app, &owner, "Former", Some(in_days(-100))).await;

    let (status, _) = app
        .put(
            &format!("/api/v1/personnel/{}", gone["id"].as_str().unwrap()),
            &owner.token,
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/v1/personnel/health-books", &owner.token).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Lapsed", "Soon", "No Book"]);

    // A wider window pulls in the valid book too
    let (_, body) = app.get("/api/v1/personnel/health-books?days=365", &owner.token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, _) = app.get("/api/v1/personnel/health-books?days=400", &owner.token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_personnel_tenancy() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let intruder = app.tenant("intruder@example.bg", EIK_B).await;
    let worker = hire(&app, &owner, "Ivan Georgiev", None).await;
    let uri = format!("/api/v1/personnel/{}", worker["id"].as_str().unwrap());

    let (status, _) = app.get(&uri, &intruder.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get("/api/v1/personnel/health-books", &intruder.token).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = app.delete(&uri, &owner.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri, &owner.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
