//! Shared harness: the full router over a migrated in-memory database

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use haccp_server::api::{create_router, AppState};
use haccp_server::config::ServerConfig;
use haccp_server::db::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-signing-secret-0123456789";
pub const CRON_SECRET: &str = "integration-cron-secret";
pub const PASSWORD: &str = "correct-horse-battery";

/// Known-good EIKs
pub const EIK_A: &str = "831641791";
pub const EIK_B: &str = "175074752";
pub const EIK_C: &str = "121212121";

pub fn test_config(cron_secret: Option<&str>) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config.auth.bcrypt_cost = 4;
    config.cron.secret = cron_secret.map(str::to_string);
    config
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    /// Token of the bootstrap administrator (the first registered account)
    pub admin_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config(Some(CRON_SECRET))).await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        let mut app = Self::without_accounts(config).await;
        app.admin_token = app.register("admin@haccp.test").await.0;
        app
    }

    /// Migrated but empty: nobody has registered yet
    pub async fn without_accounts(config: ServerConfig) -> Self {
        let db = DatabaseConnection::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();

        let state = AppState::new(db.clone(), &config).unwrap();
        Self {
            router: create_router(state),
            db,
            admin_token: String::new(),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register an account; returns its token and id
    pub async fn register(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(json!({ "email": email, "password": PASSWORD, "full_name": "Test User" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_business(&self, token: &str, eik: &str) -> String {
        let (status, body) = self
            .post("/api/v1/businesses", token, json!({ "name": "Sofia Foods", "eik": eik }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create business failed: {body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_establishment(&self, token: &str, business_id: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/establishments",
                token,
                json!({
                    "business_id": business_id,
                    "name": "Bistro Vitosha",
                    "establishment_type": "restaurant",
                    "seats": 40
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create establishment failed: {body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// A fresh tenant with one business and one establishment
    pub async fn tenant(&self, email: &str, eik: &str) -> Tenant {
        let (token, user_id) = self.register(email).await;
        let business_id = self.create_business(&token, eik).await;
        let establishment_id = self.create_establishment(&token, &business_id).await;
        Tenant {
            token,
            user_id,
            business_id,
            establishment_id,
        }
    }

    /// POST to a cron route with the given bearer secret
    pub async fn cron(&self, path: &str, secret: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::POST, path, secret, None).await
    }
}

pub struct Tenant {
    pub token: String,
    pub user_id: String,
    pub business_id: String,
    pub establishment_id: String,
}
