//! Business API models

use chrono::Utc;
use haccp_core::{validate_eik, Eik};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{validate_email, validate_not_empty, validate_string_length};
use crate::api::models::non_blank;
use crate::db::models::Business;

/// Request to register a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    /// 9- or 13-digit EIK
    pub eik: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CreateBusinessRequest {
    /// Validate and return the checked EIK
    pub fn validate(&self) -> ApiResult<Eik> {
        validate_not_empty(&self.name, "name")?;
        validate_string_length(self.name.trim(), "name", 1, 255)?;
        if let Some(email) = non_blank(self.email.clone()) {
            validate_email(&email, "email")?;
        }
        Ok(validate_eik(self.eik.trim())?)
    }

    pub fn into_business(self, user_id: &str, eik: Eik) -> Business {
        let now = Utc::now().to_rfc3339();
        Business {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: self.name.trim().to_string(),
            eik: eik.to_string(),
            address: non_blank(self.address),
            phone: non_blank(self.phone),
            email: non_blank(self.email).map(|e| e.to_lowercase()),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to update a business
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub eik: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl UpdateBusinessRequest {
    /// Check if any fields are being updated
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.eik.is_some()
            || self.address.is_some()
            || self.phone.is_some()
            || self.email.is_some()
    }

    /// Validate and merge into the stored row
    pub fn apply(self, business: &mut Business) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(name) = self.name {
            validate_not_empty(&name, "name")?;
            validate_string_length(name.trim(), "name", 1, 255)?;
            business.name = name.trim().to_string();
        }
        if let Some(eik) = self.eik {
            business.eik = validate_eik(eik.trim())?.to_string();
        }
        if self.address.is_some() {
            business.address = non_blank(self.address);
        }
        if self.phone.is_some() {
            business.phone = non_blank(self.phone);
        }
        if self.email.is_some() {
            let email = non_blank(self.email);
            if let Some(email) = &email {
                validate_email(email, "email")?;
            }
            business.email = email.map(|e| e.to_lowercase());
        }
        Ok(())
    }
}

/// Query parameters for listing businesses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
