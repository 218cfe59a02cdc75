//! REST API layer for the logbook server
//!
//! Provides HTTP/REST endpoints for:
//! - Accounts and token issuance
//! - Businesses, establishments and personnel
//! - Temperature diaries, incoming controls, cleaning and food diaries
//! - Administration and scheduled diary generation

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;

pub use auth::{AdminUser, AuthUser};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use middleware::cors_layer;
pub use response::{PaginatedResponse, SuccessResponse};
pub use routes::{create_router, AppState};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::api::error::{ApiError, ApiResult};
    pub use crate::api::models::*;
    pub use crate::api::response::*;
}
