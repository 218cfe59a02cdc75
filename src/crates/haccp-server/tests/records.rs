mod common;

use axum::http::StatusCode;
use common::{TestApp, CRON_SECRET, EIK_A, EIK_B};
use serde_json::json;

#[tokio::test]
async fn test_food_diary_cron() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let (status, body) = app
        .post(
            "/api/v1/food-items",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "name": "Shopska salad",
                "category": "salad",
                "storage_type": "cold_display"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/v1/food-items",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "name": "Moussaka",
                "category": "hot_dish",
                "storage_type": "sauna"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let path = "/api/v1/admin/cron/food-diary?date=2099-07-01";
    let (status, body) = app.cron(path, Some(CRON_SECRET)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 2);

    let (_, body) = app.cron(path, Some(CRON_SECRET)).await;
    assert_eq!(body["data"]["created"], 0);
    assert_eq!(body["data"]["skipped"], 2);

    let (status, body) = app
        .get(&format!("/api/v1/food-diary?food_item_id={item_id}"), &owner.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    for entry in body["data"].as_array().unwrap() {
        let t = entry["temperature"].as_f64().unwrap();
        assert!((0.0..=4.0).contains(&t));
        assert_eq!(entry["is_generated"], true);
    }

    // Inactive items drop out of generation
    let (status, _) = app
        .put(
            &format!("/api/v1/food-items/{item_id}"),
            &owner.token,
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app
        .cron("/api/v1/admin/cron/food-diary?date=2099-07-02", Some(CRON_SECRET))
        .await;
    assert_eq!(body["data"]["created"], 0);
}

#[tokio::test]
async fn test_manual_food_diary_entry() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let (_, body) = app
        .post(
            "/api/v1/food-items",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "name": "Tarator",
                "category": "cold_dish",
                "storage_type": "refrigerator"
            }),
        )
        .await;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/v1/food-diary",
            &owner.token,
            json!({
                "food_item_id": item_id,
                "entry_date": "2099-07-01",
                "entry_time": "12:00",
                "temperature": 3.5,
                "portions": -1
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app
        .post(
            "/api/v1/food-diary",
            &owner.token,
            json!({
                "food_item_id": item_id,
                "entry_date": "2099-07-01",
                "entry_time": "12:00",
                "temperature": 3.5,
                "portions": 24
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["portions"], 24);
    assert_eq!(body["data"]["is_generated"], false);

    let entry_id = body["data"]["id"].as_str().unwrap();
    let (status, _) = app.delete(&format!("/api/v1/food-diary/{entry_id}"), &owner.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cleaning_log_from_template() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;

    let (status, body) = app
        .post(
            "/api/v1/cleaning-templates",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "area": "Kitchen",
                "task": "Sanitise work surfaces",
                "frequency": "daily",
                "disinfectant": "Chlorine 0.1%"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let template_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/v1/cleaning-logs",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "template_id": template_id,
                "performed_on": "2099-04-10",
                "performed_by": "Elena"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["area"], "Kitchen");
    assert_eq!(body["data"]["task"], "Sanitise work surfaces");

    let (status, _) = app
        .post(
            "/api/v1/cleaning-templates",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "area": "Kitchen",
                "task": "Floors",
                "frequency": "hourly"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A template from another establishment is refused
    let second = app.create_establishment(&owner.token, &owner.business_id).await;
    let (status, _) = app
        .post(
            "/api/v1/cleaning-logs",
            &owner.token,
            json!({
                "establishment_id": second,
                "template_id": template_id,
                "performed_on": "2099-04-10",
                "performed_by": "Elena"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .get(
            &format!(
                "/api/v1/cleaning-logs?establishment_id={}&from=2099-04-01&to=2099-04-30",
                owner.establishment_id
            ),
            &owner.token,
        )
        .await;
    assert_eq!(body["total"], 1);

    let (_, stats) = app.get("/api/v1/admin/stats", &app.admin_token).await;
    assert_eq!(stats["data"]["cleaning_templates"], 1);
    assert_eq!(stats["data"]["cleaning_logs"], 1);
}

#[tokio::test]
async fn test_incoming_control_lifecycle() {
    let app = TestApp::new().await;
    let owner = app.tenant("owner@example.bg", EIK_A).await;
    let intruder = app.tenant("intruder@example.bg", EIK_B).await;

    let (status, body) = app
        .post(
            "/api/v1/incoming-controls",
            &owner.token,
            json!({
                "establishment_id": owner.establishment_id,
                "received_on": "2099-02-14",
                "supplier": "Metro Sofia",
                "product_name": "Chicken breast",
                "batch_number": "L2099-44",
                "quantity": 12.5,
                "unit": "kg",
                "temperature": 2.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["is_accepted"], true);
    let (_, stats) = app.get("/api/v1/admin/stats", &app.admin_token).await;
    assert_eq!(stats["data"]["incoming_controls"], 1);
    let uri = format!("/api/v1/incoming-controls/{}", body["data"]["id"].as_str().unwrap());

    let (status, body) = app
        .put(&uri, &owner.token, json!({ "is_accepted": false, "notes": "Broken cold chain" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_accepted"], false);

    let (status, _) = app.put(&uri, &owner.token, json!({ "unit": "barrels" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get(&uri, &intruder.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &owner.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, stats) = app.get("/api/v1/admin/stats", &app.admin_token).await;
    assert_eq!(stats["data"]["incoming_controls"], 0);
}
