//! Establishment API models

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_not_empty, validate_one_of, validate_string_length, validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::Establishment;

/// Accepted `establishment_type` values
pub const ESTABLISHMENT_TYPES: &[&str] = &[
    "restaurant",
    "cafe",
    "bar",
    "bakery",
    "canteen",
    "catering",
    "shop",
    "other",
];

fn validate_seats(seats: Option<i64>) -> ApiResult<()> {
    match seats {
        Some(n) if n < 0 => Err(ApiError::ValidationError("seats cannot be negative".to_string())),
        _ => Ok(()),
    }
}

/// Request to add an establishment to a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEstablishmentRequest {
    pub business_id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub establishment_type: String,
    /// Registration number with the food safety agency
    pub registration_number: Option<String>,
    pub seats: Option<i64>,
}

impl CreateEstablishmentRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.business_id)?;
        validate_not_empty(&self.name, "name")?;
        validate_string_length(self.name.trim(), "name", 1, 255)?;
        validate_one_of(&self.establishment_type, "establishment_type", ESTABLISHMENT_TYPES)?;
        validate_seats(self.seats)
    }

    pub fn into_establishment(self) -> Establishment {
        let now = Utc::now().to_rfc3339();
        Establishment {
            id: Uuid::new_v4().to_string(),
            business_id: self.business_id,
            name: self.name.trim().to_string(),
            address: non_blank(self.address),
            city: non_blank(self.city),
            establishment_type: self.establishment_type,
            registration_number: non_blank(self.registration_number),
            seats: self.seats,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to update an establishment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEstablishmentRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub establishment_type: Option<String>,
    pub registration_number: Option<String>,
    pub seats: Option<i64>,
}

impl UpdateEstablishmentRequest {
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.address.is_some()
            || self.city.is_some()
            || self.establishment_type.is_some()
            || self.registration_number.is_some()
            || self.seats.is_some()
    }

    /// Validate and merge into the stored row
    pub fn apply(self, establishment: &mut Establishment) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(name) = self.name {
            validate_not_empty(&name, "name")?;
            validate_string_length(name.trim(), "name", 1, 255)?;
            establishment.name = name.trim().to_string();
        }
        if let Some(kind) = self.establishment_type {
            validate_one_of(&kind, "establishment_type", ESTABLISHMENT_TYPES)?;
            establishment.establishment_type = kind;
        }
        if self.seats.is_some() {
            validate_seats(self.seats)?;
            establishment.seats = self.seats;
        }
        if self.address.is_some() {
            establishment.address = non_blank(self.address);
        }
        if self.city.is_some() {
            establishment.city = non_blank(self.city);
        }
        if self.registration_number.is_some() {
            establishment.registration_number = non_blank(self.registration_number);
        }
        Ok(())
    }
}

/// Query parameters for listing establishments
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstablishmentListQuery {
    pub business_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
