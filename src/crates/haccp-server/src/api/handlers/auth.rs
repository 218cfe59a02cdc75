//! Account registration and login handlers

use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{normalize_email, AuthResponse, LoginRequest, RegisterRequest},
    response,
    routes::AppState,
};
use crate::db::models::User;
use crate::db::repositories::UserRepository;

/// Create an account and return a token for it
///
/// The first account on an empty database becomes the administrator.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let pool = app_state.db.pool();
    let email = normalize_email(&req.email);
    if UserRepository::get_by_email(pool, &email).await?.is_some() {
        return Err(ApiError::Conflict(format!("Email already registered: {}", email)));
    }

    let now = Utc::now().to_rfc3339();
    let user = User {
        id: Uuid::new_v4().to_string(),
        email,
        password_hash: app_state.auth.hash_password(&req.password).await?,
        full_name: req.full_name.trim().to_string(),
        role: "user".to_string(),
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
    };
    let user = UserRepository::create_registered(pool, &user).await?;

    let jwt = app_state.auth.jwt();
    let token = jwt.issue(&user)?;

    tracing::info!("Registered user {} ({})", user.id, user.role);
    Ok(response::created(AuthResponse::bearer(token, jwt.ttl_secs(), user)))
}

/// Exchange credentials for a token
///
/// POST /api/v1/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&req.email);
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = match UserRepository::get_by_email(app_state.db.pool(), &email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login attempt for unknown email");
            return Err(invalid());
        }
    };

    if !app_state.auth.verify_password(&req.password, &user.password_hash).await? {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }
    if !user.is_active {
        tracing::warn!("Login refused for disabled user {}", user.id);
        return Err(ApiError::Forbidden("Account is disabled".to_string()));
    }

    let jwt = app_state.auth.jwt();
    let token = jwt.issue(&user)?;

    tracing::info!("User {} logged in", user.id);
    Ok(response::ok(AuthResponse::bearer(token, jwt.ttl_secs(), user)))
}

/// The calling account
///
/// GET /api/v1/auth/me
pub async fn me(caller: AuthUser) -> ApiResult<impl IntoResponse> {
    Ok(response::ok(caller.user))
}
