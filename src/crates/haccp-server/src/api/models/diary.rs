//! Diary device and temperature reading API models

use chrono::Utc;
use haccp_core::{EquipmentType, TemperatureRange};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_date, validate_not_empty, validate_slot, validate_string_length, validate_temperature,
    validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::{DiaryDevice, TemperatureReading};

fn parse_equipment(value: &str, field_name: &str) -> ApiResult<EquipmentType> {
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = EquipmentType::ALL.iter().map(|t| t.as_str()).collect();
        ApiError::ValidationError(format!("{} must be one of: {}", field_name, allowed.join(", ")))
    })
}

fn checked_range(min: f64, max: f64) -> ApiResult<TemperatureRange> {
    validate_temperature(min, "min_temp")?;
    validate_temperature(max, "max_temp")?;
    TemperatureRange::new(min, max).map_err(|e| ApiError::ValidationError(e.to_string()))
}

/// Request to register a refrigeration or display unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceRequest {
    pub establishment_id: String,
    pub name: String,
    pub device_type: String,
    /// Defaults to the lower bound for the device type
    pub min_temp: Option<f64>,
    /// Defaults to the upper bound for the device type
    pub max_temp: Option<f64>,
    pub location: Option<String>,
}

impl CreateDeviceRequest {
    /// Validate and resolve the permitted range
    pub fn validate(&self) -> ApiResult<TemperatureRange> {
        validate_uuid(&self.establishment_id)?;
        validate_not_empty(&self.name, "name")?;
        validate_string_length(self.name.trim(), "name", 1, 255)?;
        let kind = parse_equipment(&self.device_type, "device_type")?;
        let defaults = kind.default_range();
        checked_range(
            self.min_temp.unwrap_or(defaults.min()),
            self.max_temp.unwrap_or(defaults.max()),
        )
    }

    pub fn into_device(self, range: TemperatureRange) -> DiaryDevice {
        let now = Utc::now().to_rfc3339();
        DiaryDevice {
            id: Uuid::new_v4().to_string(),
            establishment_id: self.establishment_id,
            name: self.name.trim().to_string(),
            device_type: self.device_type,
            min_temp: range.min(),
            max_temp: range.max(),
            location: non_blank(self.location),
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to update a device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateDeviceRequest {
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.device_type.is_some()
            || self.min_temp.is_some()
            || self.max_temp.is_some()
            || self.location.is_some()
            || self.is_active.is_some()
    }

    pub fn apply(self, device: &mut DiaryDevice) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(name) = self.name {
            validate_not_empty(&name, "name")?;
            validate_string_length(name.trim(), "name", 1, 255)?;
            device.name = name.trim().to_string();
        }
        if let Some(kind) = self.device_type {
            device.device_type = parse_equipment(&kind, "device_type")?.as_str().to_string();
        }
        let range = checked_range(
            self.min_temp.unwrap_or(device.min_temp),
            self.max_temp.unwrap_or(device.max_temp),
        )?;
        device.min_temp = range.min();
        device.max_temp = range.max();
        if self.location.is_some() {
            device.location = non_blank(self.location);
        }
        if let Some(active) = self.is_active {
            device.is_active = active;
        }
        Ok(())
    }
}

/// A newly registered device and the size of its backfill
#[derive(Debug, Clone, Serialize)]
pub struct DeviceResponse {
    #[serde(flatten)]
    pub device: DiaryDevice,
    pub readings_created: u64,
}

/// Query parameters for listing devices
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListQuery {
    pub establishment_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request to record a manual reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReadingRequest {
    pub device_id: String,
    pub reading_date: String,
    /// `HH:MM`
    pub reading_time: String,
    pub temperature: f64,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}

impl CreateReadingRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.device_id)?;
        validate_date(&self.reading_date, "reading_date")?;
        validate_slot(&self.reading_time, "reading_time")?;
        validate_temperature(self.temperature, "temperature")
    }

    pub fn into_reading(self) -> TemperatureReading {
        TemperatureReading {
            id: Uuid::new_v4().to_string(),
            device_id: self.device_id,
            reading_date: self.reading_date,
            reading_time: self.reading_time,
            temperature: self.temperature,
            is_generated: false,
            recorded_by: non_blank(self.recorded_by),
            notes: non_blank(self.notes),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Query parameters for listing readings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingListQuery {
    pub device_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
