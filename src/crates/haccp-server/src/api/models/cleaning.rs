//! Cleaning schedule API models

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_date, validate_not_empty, validate_one_of, validate_string_length, validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::{CleaningLog, CleaningTemplate};

/// Accepted template frequencies
pub const FREQUENCIES: &[&str] = &["daily", "weekly", "monthly"];

/// Accepted log statuses
pub const CLEANING_STATUSES: &[&str] = &["done", "skipped"];

fn validate_text(value: &str, field_name: &str) -> ApiResult<()> {
    validate_not_empty(value, field_name)?;
    validate_string_length(value.trim(), field_name, 1, 255)
}

/// Request to add a recurring cleaning task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCleaningTemplateRequest {
    pub establishment_id: String,
    pub area: String,
    pub task: String,
    pub frequency: String,
    pub disinfectant: Option<String>,
}

impl CreateCleaningTemplateRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.establishment_id)?;
        validate_text(&self.area, "area")?;
        validate_text(&self.task, "task")?;
        validate_one_of(&self.frequency, "frequency", FREQUENCIES)
    }

    pub fn into_template(self) -> CleaningTemplate {
        let now = Utc::now().to_rfc3339();
        CleaningTemplate {
            id: Uuid::new_v4().to_string(),
            establishment_id: self.establishment_id,
            area: self.area.trim().to_string(),
            task: self.task.trim().to_string(),
            frequency: self.frequency,
            disinfectant: non_blank(self.disinfectant),
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to update a cleaning task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCleaningTemplateRequest {
    pub area: Option<String>,
    pub task: Option<String>,
    pub frequency: Option<String>,
    pub disinfectant: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateCleaningTemplateRequest {
    pub fn has_updates(&self) -> bool {
        self.area.is_some()
            || self.task.is_some()
            || self.frequency.is_some()
            || self.disinfectant.is_some()
            || self.is_active.is_some()
    }

    pub fn apply(self, template: &mut CleaningTemplate) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(area) = self.area {
            validate_text(&area, "area")?;
            template.area = area.trim().to_string();
        }
        if let Some(task) = self.task {
            validate_text(&task, "task")?;
            template.task = task.trim().to_string();
        }
        if let Some(frequency) = self.frequency {
            validate_one_of(&frequency, "frequency", FREQUENCIES)?;
            template.frequency = frequency;
        }
        if self.disinfectant.is_some() {
            template.disinfectant = non_blank(self.disinfectant);
        }
        if let Some(active) = self.is_active {
            template.is_active = active;
        }
        Ok(())
    }
}

/// Query parameters for listing cleaning tasks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleaningTemplateListQuery {
    pub establishment_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request to record a cleaning
///
/// With a `template_id`, missing `area` and `task` are taken from the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCleaningLogRequest {
    pub establishment_id: String,
    pub template_id: Option<String>,
    pub area: Option<String>,
    pub task: Option<String>,
    pub performed_on: String,
    pub performed_by: String,
    /// `done` unless given
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl CreateCleaningLogRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.establishment_id)?;
        if let Some(template_id) = &self.template_id {
            validate_uuid(template_id)?;
        }
        validate_date(&self.performed_on, "performed_on")?;
        validate_text(&self.performed_by, "performed_by")?;
        if let Some(status) = &self.status {
            validate_one_of(status, "status", CLEANING_STATUSES)?;
        }
        Ok(())
    }

    /// Build the row, filling area/task from the template where omitted
    pub fn into_log(self, template: Option<&CleaningTemplate>) -> ApiResult<CleaningLog> {
        if let Some(template) = template {
            if template.establishment_id != self.establishment_id {
                return Err(ApiError::ValidationError(
                    "template_id belongs to another establishment".to_string(),
                ));
            }
        }

        let area = non_blank(self.area)
            .or_else(|| template.map(|t| t.area.clone()))
            .ok_or_else(|| ApiError::ValidationError("area cannot be empty".to_string()))?;
        let task = non_blank(self.task)
            .or_else(|| template.map(|t| t.task.clone()))
            .ok_or_else(|| ApiError::ValidationError("task cannot be empty".to_string()))?;
        validate_string_length(&area, "area", 1, 255)?;
        validate_string_length(&task, "task", 1, 255)?;

        Ok(CleaningLog {
            id: Uuid::new_v4().to_string(),
            establishment_id: self.establishment_id,
            template_id: template.map(|t| t.id.clone()),
            area,
            task,
            performed_on: self.performed_on,
            performed_by: self.performed_by.trim().to_string(),
            status: self.status.unwrap_or_else(|| "done".to_string()),
            notes: non_blank(self.notes),
            created_at: Utc::now().to_rfc3339(),
        })
    }
}

/// Query parameters for listing cleaning records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleaningLogListQuery {
    pub establishment_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
