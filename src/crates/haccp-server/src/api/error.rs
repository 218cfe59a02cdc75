//! API error types and HTTP response conversion
//!
//! Provides custom error types for API operations with conversion to Axum HTTP responses.
//! Database errors map to 404/409/500; server-side failures never echo their
//! detail to the client.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use haccp_core::EikError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseError;
use crate::services::AuthError;

/// API error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ApiErrorResponse {
    /// Create a new API error response
    pub fn new(error: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Custom API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation error
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// EIK failed shape or checksum validation
    #[error("Invalid EIK: {0}")]
    InvalidEik(#[from] EikError),

    /// Conflict (e.g., duplicate resource)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    /// Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidEik(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(db_err) => {
                if db_err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if db_err.is_constraint_violation() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            ApiError::JsonError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code identifier
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidEik(_) => "INVALID_EIK",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::DatabaseError(db_err) => {
                if db_err.is_not_found() {
                    "NOT_FOUND"
                } else if db_err.is_constraint_violation() {
                    "DB_CONSTRAINT_VIOLATION"
                } else {
                    "DB_ERROR"
                }
            }
            ApiError::JsonError(_) => "JSON_ERROR",
        }
    }

    /// Get the error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::InvalidEik(_) => "InvalidEik",
            ApiError::Conflict(_) => "Conflict",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Forbidden(_) => "Forbidden",
            ApiError::InternalError(_) => "InternalError",
            ApiError::DatabaseError(_) => "DatabaseError",
            ApiError::JsonError(_) => "JsonError",
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::DatabaseError(db_err) if db_err.is_constraint_violation() => {
                "The record conflicts with existing data".to_string()
            }
            err if err.status_code().is_server_error() => "Internal server error".to_string(),
            err => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("API error ({}): {}", self.code(), self);
        } else {
            tracing::debug!("API error ({}): {}", self.code(), self);
        }

        let body = ApiErrorResponse::new(self.error_type(), self.public_message(), self.code());
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(DatabaseError::from(err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::JsonError(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(_) => ApiError::Unauthorized("Invalid token".to_string()),
            AuthError::WeakSecret | AuthError::Hashing(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
