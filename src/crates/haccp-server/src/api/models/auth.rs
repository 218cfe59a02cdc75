//! Auth API models

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{validate_email, validate_not_empty, validate_string_length};
use crate::db::models::User;
use crate::services::auth::MIN_PASSWORD_LEN;

/// bcrypt ignores input past 72 bytes
const MAX_PASSWORD_BYTES: usize = 72;

/// Lower-cased, trimmed email used as the login key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_email(&normalize_email(&self.email), "email")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::ValidationError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(ApiError::ValidationError(format!(
                "password cannot exceed {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        validate_not_empty(&self.full_name, "full_name")?;
        validate_string_length(self.full_name.trim(), "full_name", 1, 255)?;
        Ok(())
    }
}

/// Credentials for a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued token and the account it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires
    pub expires_in: u64,
    pub user: User,
}

impl AuthResponse {
    pub fn bearer(token: String, expires_in: u64, user: User) -> Self {
        Self {
            token,
            token_type: "Bearer",
            expires_in,
            user,
        }
    }
}
