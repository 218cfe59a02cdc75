//! API request/response models
//!
//! Data transfer objects for the REST endpoints, with their validation.

pub mod admin;
pub mod auth;
pub mod business;
pub mod cleaning;
pub mod diary;
pub mod eik;
pub mod establishment;
pub mod food;
pub mod health;
pub mod incoming_control;
pub mod personnel;
pub mod temperature_log;

pub use admin::*;
pub use auth::*;
pub use business::*;
pub use cleaning::*;
pub use diary::*;
pub use eik::*;
pub use establishment::*;
pub use food::*;
pub use health::*;
pub use incoming_control::*;
pub use personnel::*;
pub use temperature_log::*;

use crate::api::error::ApiResult;
use crate::api::middleware::validation::validate_pagination;
use crate::db::repositories::Page;

/// Items per page when the client does not say
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page a client may request
pub const MAX_PER_PAGE: u32 = 100;

/// Resolved `page` / `per_page` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> ApiResult<Self> {
        let page = page.unwrap_or(0);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        validate_pagination(page, per_page, MAX_PER_PAGE)?;
        Ok(Self { page, per_page })
    }

    /// LIMIT/OFFSET window for the repositories
    pub fn window(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}

/// Trim an optional text field; blank becomes `None`
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
