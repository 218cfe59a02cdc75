//! Business-level temperature log model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A temperature journal row for a piece of equipment named by the business
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemperatureLog {
    pub id: String,
    pub business_id: String,
    pub establishment_id: Option<String>,
    pub equipment_name: String,

    /// refrigerator, freezer, cold_display, hot_display
    pub equipment_type: String,

    pub log_date: String,
    pub log_time: String,
    pub temperature: f64,
    pub is_generated: bool,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}
