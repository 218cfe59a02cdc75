mod common;

use axum::http::StatusCode;
use common::{test_config, TestApp, CRON_SECRET, EIK_A, EIK_B};
use serde_json::{json, Value};

async fn create_device(app: &TestApp, token: &str, establishment_id: &str, body: Value) -> (StatusCode, Value) {
    let mut body = body;
    body["establishment_id"] = json!(establishment_id);
    app.post("/api/v1/diary-devices", token, body).await
}

#[tokio::test]
async fn test_device_registration_backfills_readings() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let (status, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Walk-in fridge", "device_type": "refrigerator" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["readings_created"], 30);
    assert_eq!(body["data"]["min_temp"], 0.0);
    assert_eq!(body["data"]["max_temp"], 4.0);

    let device_id = body["data"]["id"].as_str().unwrap();
    let (status, body) = app
        .get(
            &format!("/api/v1/temperature-readings?device_id={device_id}&per_page=100"),
            &owner.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 30);

    for reading in body["data"].as_array().unwrap() {
        let t = reading["temperature"].as_f64().unwrap();
        assert!((0.0..=4.0).contains(&t), "reading {t} outside the device range");
        assert_eq!(reading["is_generated"], true);
        let slot = reading["reading_time"].as_str().unwrap();
        assert!(slot == "10:00" || slot == "17:00");
    }
}

#[tokio::test]
async fn test_device_range_validation() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let (status, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Broken", "device_type": "freezer", "min_temp": -10.0, "max_temp": -20.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Oven", "device_type": "oven" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Chest", "device_type": "freezer", "min_temp": -22.0, "max_temp": -16.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["min_temp"], -22.0);
}

#[tokio::test]
async fn test_device_range_without_one_decimal_value_is_rejected() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let (status, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Lab fridge", "device_type": "refrigerator", "min_temp": 0.01, "max_temp": 0.02 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, stats) = app.get("/api/v1/admin/stats", &app.admin_token).await;
    assert_eq!(stats["data"]["diary_devices"], 0);
    assert_eq!(stats["data"]["temperature_readings"], 0);

    // Narrow but holding 0.1: every backfilled reading is exactly 0.1
    let (status, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Lab fridge", "device_type": "refrigerator", "min_temp": 0.05, "max_temp": 0.12 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let device_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .get(
            &format!("/api/v1/temperature-readings?device_id={device_id}&per_page=100"),
            &owner.token,
        )
        .await;
    assert_eq!(body["total"], 30);
    for reading in body["data"].as_array().unwrap() {
        assert_eq!(reading["temperature"], 0.1);
    }

    let (status, body) = app
        .put(
            &format!("/api/v1/diary-devices/{device_id}"),
            &owner.token,
            json!({ "min_temp": 0.11, "max_temp": 0.12 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_device_in_foreign_establishment_is_forbidden() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let intruder = app.tenant("intruder@example.bg", EIK_B).await;

    let (status, _) = create_device(
        &app,
        &intruder.token,
        &owner.establishment_id,
        json!({ "name": "Sneaky", "device_type": "refrigerator" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get("/api/v1/diary-devices", &intruder.token).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_manual_reading_and_duplicate_slot() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let (_, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Display", "device_type": "cold_display" }),
    )
    .await;
    let device_id = body["data"]["id"].as_str().unwrap().to_string();

    let reading = json!({
        "device_id": device_id,
        "reading_date": "2099-03-01",
        "reading_time": "12:30",
        "temperature": 9.5,
        "recorded_by": "Maria"
    });
    let (status, body) = app.post("/api/v1/temperature-readings", &owner.token, reading.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_generated"], false);
    let reading_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.post("/api/v1/temperature-readings", &owner.token, reading).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DB_CONSTRAINT_VIOLATION");

    let (status, body) = app
        .post(
            "/api/v1/temperature-readings",
            &owner.token,
            json!({
                "device_id": device_id,
                "reading_date": "2099-02-30",
                "reading_time": "12:30",
                "temperature": 3.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, body) = app
        .get(
            &format!("/api/v1/temperature-readings?device_id={device_id}&from=2099-01-01&to=2099-12-31"),
            &owner.token,
        )
        .await;
    assert_eq!(body["total"], 1);

    let (status, _) = app
        .delete(&format!("/api/v1/temperature-readings/{reading_id}"), &owner.token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cron_readings_are_idempotent() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    for name in ["Fridge 1", "Fridge 2"] {
        let (status, _) = create_device(
            &app,
            &owner.token,
            &owner.establishment_id,
            json!({ "name": name, "device_type": "refrigerator" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let path = "/api/v1/admin/cron/temperature-readings?date=2099-06-15";
    let (status, body) = app.cron(path, Some(CRON_SECRET)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2099-06-15");
    assert_eq!(body["data"]["created"], 4);
    assert_eq!(body["data"]["skipped"], 0);

    let (status, body) = app.cron(path, Some(CRON_SECRET)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 0);
    assert_eq!(body["data"]["skipped"], 4);
}

#[tokio::test]
async fn test_cron_today_is_covered_by_backfill() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Fridge", "device_type": "refrigerator" }),
    )
    .await;

    let (status, body) = app
        .cron("/api/v1/admin/cron/temperature-readings", Some(CRON_SECRET))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 0);
    assert_eq!(body["data"]["skipped"], 2);
}

#[tokio::test]
async fn test_inactive_devices_are_not_generated() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let (_, body) = create_device(
        &app,
        &owner.token,
        &owner.establishment_id,
        json!({ "name": "Old fridge", "device_type": "refrigerator" }),
    )
    .await;
    let device_id = body["data"]["id"].as_str().unwrap();

    let (status, body) = app
        .put(
            &format!("/api/v1/diary-devices/{device_id}"),
            &owner.token,
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = app
        .cron("/api/v1/admin/cron/temperature-readings?date=2099-06-15", Some(CRON_SECRET))
        .await;
    assert_eq!(body["data"]["created"], 0);
}

#[tokio::test]
async fn test_cron_secret_is_enforced() {
    let app = TestApp::new().await;
    let path = "/api/v1/admin/cron/temperature-readings";

    let (status, body) = app.cron(path, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.cron(path, Some("wrong-secret")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A user token is not a cron secret, even an administrator's
    let (status, _) = app.cron(path, Some(&app.admin_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.cron(&format!("{path}?date=2099-13-01"), Some(CRON_SECRET)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cron_disabled_without_secret() {
    let app = TestApp::with_config(test_config(None)).await;

    let (status, body) = app
        .cron("/api/v1/admin/cron/food-diary", Some(CRON_SECRET))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_temperature_log_generation_follows_existing_equipment() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let (status, body) = app
        .post(
            "/api/v1/temperature-logs",
            &owner.token,
            json!({
                "business_id": owner.business_id,
                "establishment_id": owner.establishment_id,
                "equipment_name": "Bar freezer",
                "equipment_type": "freezer",
                "log_date": "2099-05-01",
                "log_time": "10:00",
                "temperature": -19.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["is_generated"], false);

    let generate = json!({ "business_id": owner.business_id, "date": "2099-05-02" });
    let (status, body) = app
        .post("/api/v1/temperature-logs/generate", &owner.token, generate.clone())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 2);

    let (_, body) = app
        .post("/api/v1/temperature-logs/generate", &owner.token, generate)
        .await;
    assert_eq!(body["data"]["created"], 0);
    assert_eq!(body["data"]["skipped"], 2);

    let (status, body) = app
        .get(
            &format!(
                "/api/v1/temperature-logs?business_id={}&from=2099-05-02&to=2099-05-02",
                owner.business_id
            ),
            &owner.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    for log in body["data"].as_array().unwrap() {
        let t = log["temperature"].as_f64().unwrap();
        assert!((-36.0..=-18.0).contains(&t), "generated {t} outside the freezer range");
        assert_eq!(log["equipment_name"], "Bar freezer");
    }

    // The cron run covers every business
    let (_, body) = app
        .cron("/api/v1/admin/cron/temperature-logs?date=2099-05-03", Some(CRON_SECRET))
        .await;
    assert_eq!(body["data"]["created"], 2);
}

#[tokio::test]
async fn test_equipment_names_are_scoped_per_establishment() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let second = app.create_establishment(&owner.token, &owner.business_id).await;

    for establishment_id in [&owner.establishment_id, &second] {
        let (status, body) = app
            .post(
                "/api/v1/temperature-logs",
                &owner.token,
                json!({
                    "business_id": owner.business_id,
                    "establishment_id": establishment_id,
                    "equipment_name": "Fridge 1",
                    "equipment_type": "refrigerator",
                    "log_date": "2099-06-01",
                    "log_time": "10:00",
                    "temperature": 3.0
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    // The same fridge twice at one slot is still a duplicate
    let (status, _) = app
        .post(
            "/api/v1/temperature-logs",
            &owner.token,
            json!({
                "business_id": owner.business_id,
                "establishment_id": second,
                "equipment_name": "Fridge 1",
                "equipment_type": "refrigerator",
                "log_date": "2099-06-01",
                "log_time": "10:00",
                "temperature": 2.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let generate = json!({ "business_id": owner.business_id, "date": "2099-06-02" });
    let (status, body) = app
        .post("/api/v1/temperature-logs/generate", &owner.token, generate)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 4);

    let (_, body) = app
        .get(
            &format!(
                "/api/v1/temperature-logs?business_id={}&from=2099-06-02&to=2099-06-02",
                owner.business_id
            ),
            &owner.token,
        )
        .await;
    let mut establishments: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["establishment_id"].as_str().unwrap())
        .collect();
    establishments.sort();
    establishments.dedup();
    assert_eq!(establishments.len(), 2);
}

#[tokio::test]
async fn test_temperature_log_rejects_foreign_establishment() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let other_business = app.create_business(&owner.token, EIK_B).await;

    let (status, body) = app
        .post(
            "/api/v1/temperature-logs",
            &owner.token,
            json!({
                "business_id": other_business,
                "establishment_id": owner.establishment_id,
                "equipment_name": "Fridge",
                "equipment_type": "refrigerator",
                "log_date": "2099-05-01",
                "log_time": "10:00",
                "temperature": 3.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}
