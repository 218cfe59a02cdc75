//! Incoming goods control API models

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_date, validate_not_empty, validate_one_of, validate_string_length,
    validate_temperature, validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::IncomingControl;

/// Accepted quantity units
pub const UNITS: &[&str] = &["kg", "g", "l", "ml", "pcs", "box"];

fn validate_quantity(quantity: f64) -> ApiResult<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ApiError::ValidationError(
            "quantity must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn validate_optional_date(value: &Option<String>, field_name: &str) -> ApiResult<()> {
    if let Some(date) = value.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        validate_date(date, field_name)?;
    }
    Ok(())
}

/// Request to record a delivery check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncomingControlRequest {
    pub establishment_id: String,
    pub received_on: String,
    pub supplier: String,
    pub product_name: String,
    pub batch_number: Option<String>,
    pub quantity: f64,
    pub unit: String,
    /// Measured on arrival
    pub temperature: Option<f64>,
    pub expiry_date: Option<String>,
    pub document_number: Option<String>,
    pub is_accepted: Option<bool>,
    pub checked_by: Option<String>,
    pub notes: Option<String>,
}

impl CreateIncomingControlRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.establishment_id)?;
        validate_date(&self.received_on, "received_on")?;
        validate_not_empty(&self.supplier, "supplier")?;
        validate_string_length(self.supplier.trim(), "supplier", 1, 255)?;
        validate_not_empty(&self.product_name, "product_name")?;
        validate_string_length(self.product_name.trim(), "product_name", 1, 255)?;
        validate_quantity(self.quantity)?;
        validate_one_of(&self.unit, "unit", UNITS)?;
        if let Some(temperature) = self.temperature {
            validate_temperature(temperature, "temperature")?;
        }
        validate_optional_date(&self.expiry_date, "expiry_date")
    }

    pub fn into_control(self) -> IncomingControl {
        let now = Utc::now().to_rfc3339();
        IncomingControl {
            id: Uuid::new_v4().to_string(),
            establishment_id: self.establishment_id,
            received_on: self.received_on,
            supplier: self.supplier.trim().to_string(),
            product_name: self.product_name.trim().to_string(),
            batch_number: non_blank(self.batch_number),
            quantity: self.quantity,
            unit: self.unit,
            temperature: self.temperature,
            expiry_date: non_blank(self.expiry_date),
            document_number: non_blank(self.document_number),
            is_accepted: self.is_accepted.unwrap_or(true),
            checked_by: non_blank(self.checked_by),
            notes: non_blank(self.notes),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to correct a delivery check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIncomingControlRequest {
    pub received_on: Option<String>,
    pub supplier: Option<String>,
    pub product_name: Option<String>,
    pub batch_number: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub temperature: Option<f64>,
    pub expiry_date: Option<String>,
    pub document_number: Option<String>,
    pub is_accepted: Option<bool>,
    pub checked_by: Option<String>,
    pub notes: Option<String>,
}

impl UpdateIncomingControlRequest {
    pub fn has_updates(&self) -> bool {
        self.received_on.is_some()
            || self.supplier.is_some()
            || self.product_name.is_some()
            || self.batch_number.is_some()
            || self.quantity.is_some()
            || self.unit.is_some()
            || self.temperature.is_some()
            || self.expiry_date.is_some()
            || self.document_number.is_some()
            || self.is_accepted.is_some()
            || self.checked_by.is_some()
            || self.notes.is_some()
    }

    pub fn apply(self, control: &mut IncomingControl) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(received_on) = self.received_on {
            validate_date(&received_on, "received_on")?;
            control.received_on = received_on;
        }
        if let Some(supplier) = self.supplier {
            validate_not_empty(&supplier, "supplier")?;
            validate_string_length(supplier.trim(), "supplier", 1, 255)?;
            control.supplier = supplier.trim().to_string();
        }
        if let Some(product) = self.product_name {
            validate_not_empty(&product, "product_name")?;
            validate_string_length(product.trim(), "product_name", 1, 255)?;
            control.product_name = product.trim().to_string();
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
            control.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            validate_one_of(&unit, "unit", UNITS)?;
            control.unit = unit;
        }
        if let Some(temperature) = self.temperature {
            validate_temperature(temperature, "temperature")?;
            control.temperature = Some(temperature);
        }
        if self.expiry_date.is_some() {
            validate_optional_date(&self.expiry_date, "expiry_date")?;
            control.expiry_date = non_blank(self.expiry_date);
        }
        if self.batch_number.is_some() {
            control.batch_number = non_blank(self.batch_number);
        }
        if self.document_number.is_some() {
            control.document_number = non_blank(self.document_number);
        }
        if let Some(accepted) = self.is_accepted {
            control.is_accepted = accepted;
        }
        if self.checked_by.is_some() {
            control.checked_by = non_blank(self.checked_by);
        }
        if self.notes.is_some() {
            control.notes = non_blank(self.notes);
        }
        Ok(())
    }
}

/// Query parameters for listing delivery checks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingControlListQuery {
    pub establishment_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
