//! Administration API models

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::validate_one_of;

/// Account roles
pub const ROLES: &[&str] = &["user", "admin"];

/// Request to change an account's role or status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserAccessRequest {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserAccessRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.role.is_none() && self.is_active.is_none() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(role) = &self.role {
            validate_one_of(role, "role", ROLES)?;
        }
        Ok(())
    }
}

/// Query parameters for listing accounts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Row counts across all tenants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    pub users: i64,
    pub businesses: i64,
    pub establishments: i64,
    pub personnel: i64,
    pub diary_devices: i64,
    pub temperature_readings: i64,
    pub temperature_logs: i64,
    pub incoming_controls: i64,
    pub cleaning_templates: i64,
    pub cleaning_logs: i64,
    pub food_diary_entries: i64,
}

/// Target day for a cron run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CronQuery {
    /// `YYYY-MM-DD`, defaults to today
    pub date: Option<String>,
}
