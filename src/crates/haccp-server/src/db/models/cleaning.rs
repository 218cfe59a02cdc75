//! Cleaning schedule models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recurring cleaning task
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CleaningTemplate {
    pub id: String,
    pub establishment_id: String,
    pub area: String,
    pub task: String,

    /// daily, weekly, monthly
    pub frequency: String,

    pub disinfectant: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A performed (or skipped) cleaning task
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CleaningLog {
    pub id: String,
    pub establishment_id: String,

    /// Template this entry was recorded from, cleared when the template is deleted
    pub template_id: Option<String>,

    pub area: String,
    pub task: String,
    pub performed_on: String,
    pub performed_by: String,

    /// done, skipped
    pub status: String,

    pub notes: Option<String>,
    pub created_at: String,
}
