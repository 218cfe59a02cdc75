//! Personnel API models

use chrono::{NaiveDate, Utc};
use haccp_core::HealthBookStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_date, validate_not_empty, validate_string_length, validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::Personnel;

fn validate_expiry(expiry: &Option<String>) -> ApiResult<()> {
    if let Some(date) = expiry.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        validate_date(date, "health_book_expiry")?;
    }
    Ok(())
}

/// Request to add a staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonnelRequest {
    pub establishment_id: String,
    pub full_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub health_book_number: Option<String>,
    /// `YYYY-MM-DD`
    pub health_book_expiry: Option<String>,
}

impl CreatePersonnelRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.establishment_id)?;
        validate_not_empty(&self.full_name, "full_name")?;
        validate_string_length(self.full_name.trim(), "full_name", 1, 255)?;
        validate_not_empty(&self.position, "position")?;
        validate_string_length(self.position.trim(), "position", 1, 100)?;
        validate_expiry(&self.health_book_expiry)
    }

    pub fn into_personnel(self) -> Personnel {
        let now = Utc::now().to_rfc3339();
        Personnel {
            id: Uuid::new_v4().to_string(),
            establishment_id: self.establishment_id,
            full_name: self.full_name.trim().to_string(),
            position: self.position.trim().to_string(),
            phone: non_blank(self.phone),
            health_book_number: non_blank(self.health_book_number),
            health_book_expiry: non_blank(self.health_book_expiry),
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to update a staff member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePersonnelRequest {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub health_book_number: Option<String>,
    pub health_book_expiry: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdatePersonnelRequest {
    pub fn has_updates(&self) -> bool {
        self.full_name.is_some()
            || self.position.is_some()
            || self.phone.is_some()
            || self.health_book_number.is_some()
            || self.health_book_expiry.is_some()
            || self.is_active.is_some()
    }

    pub fn apply(self, person: &mut Personnel) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(name) = self.full_name {
            validate_not_empty(&name, "full_name")?;
            validate_string_length(name.trim(), "full_name", 1, 255)?;
            person.full_name = name.trim().to_string();
        }
        if let Some(position) = self.position {
            validate_not_empty(&position, "position")?;
            validate_string_length(position.trim(), "position", 1, 100)?;
            person.position = position.trim().to_string();
        }
        if self.health_book_expiry.is_some() {
            validate_expiry(&self.health_book_expiry)?;
            person.health_book_expiry = non_blank(self.health_book_expiry);
        }
        if self.phone.is_some() {
            person.phone = non_blank(self.phone);
        }
        if self.health_book_number.is_some() {
            person.health_book_number = non_blank(self.health_book_number);
        }
        if let Some(active) = self.is_active {
            person.is_active = active;
        }
        Ok(())
    }
}

/// A staff member with the state of their health book
#[derive(Debug, Clone, Serialize)]
pub struct PersonnelResponse {
    #[serde(flatten)]
    pub personnel: Personnel,
    pub health_book_status: HealthBookStatus,
    /// Days until expiry; negative once expired
    pub days_remaining: Option<i64>,
}

impl PersonnelResponse {
    pub fn evaluate(personnel: Personnel, today: NaiveDate, warn_days: i64) -> Self {
        let expiry = personnel.expiry_date();
        Self {
            health_book_status: HealthBookStatus::evaluate(expiry, today, warn_days),
            days_remaining: HealthBookStatus::days_remaining(expiry, today),
            personnel,
        }
    }
}

/// Query parameters for listing personnel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonnelListQuery {
    pub establishment_id: Option<String>,
    /// Health-book status filter
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Query parameters for the health-book report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthBookQuery {
    pub establishment_id: Option<String>,
    /// Warning window in days
    pub days: Option<i64>,
}
