//! Business temperature log API models

use chrono::Utc;
use haccp_core::EquipmentType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_date, validate_not_empty, validate_slot, validate_string_length, validate_temperature,
    validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::TemperatureLog;

/// Request to record a temperature log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemperatureLogRequest {
    pub business_id: String,
    pub establishment_id: Option<String>,
    pub equipment_name: String,
    pub equipment_type: String,
    pub log_date: String,
    pub log_time: String,
    pub temperature: f64,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}

impl CreateTemperatureLogRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.business_id)?;
        if let Some(establishment_id) = &self.establishment_id {
            validate_uuid(establishment_id)?;
        }
        validate_not_empty(&self.equipment_name, "equipment_name")?;
        validate_string_length(self.equipment_name.trim(), "equipment_name", 1, 255)?;
        self.equipment_type.parse::<EquipmentType>().map_err(|_| {
            ApiError::ValidationError(format!("Unknown equipment_type: {}", self.equipment_type))
        })?;
        validate_date(&self.log_date, "log_date")?;
        validate_slot(&self.log_time, "log_time")?;
        validate_temperature(self.temperature, "temperature")
    }

    pub fn into_log(self) -> TemperatureLog {
        TemperatureLog {
            id: Uuid::new_v4().to_string(),
            business_id: self.business_id,
            establishment_id: self.establishment_id,
            equipment_name: self.equipment_name.trim().to_string(),
            equipment_type: self.equipment_type,
            log_date: self.log_date,
            log_time: self.log_time,
            temperature: self.temperature,
            is_generated: false,
            recorded_by: non_blank(self.recorded_by),
            notes: non_blank(self.notes),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Query parameters for listing temperature logs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemperatureLogListQuery {
    pub business_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request to fill one business's log for a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLogsRequest {
    pub business_id: String,
    /// Defaults to today
    pub date: Option<String>,
}
