//! Diary device and temperature reading models

use haccp_core::{EquipmentType, TemperatureRange};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A refrigerator, freezer or display whose temperature is logged twice a day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryDevice {
    pub id: String,
    pub establishment_id: String,
    pub name: String,

    /// refrigerator, freezer, cold_display, hot_display
    pub device_type: String,

    /// Lower bound of the permitted range (Celsius)
    pub min_temp: f64,

    /// Upper bound of the permitted range (Celsius)
    pub max_temp: f64,

    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl DiaryDevice {
    pub fn equipment_type(&self) -> Option<EquipmentType> {
        self.device_type.parse().ok()
    }

    /// Stored range; falls back to the equipment default if the row is inconsistent
    ///
    /// Rows with an unknown type fall back to the refrigerator range.
    pub fn range(&self) -> TemperatureRange {
        TemperatureRange::new(self.min_temp, self.max_temp).unwrap_or_else(|_| {
            self.equipment_type()
                .unwrap_or(EquipmentType::Refrigerator)
                .default_range()
        })
    }
}

/// One reading in a device's diary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemperatureReading {
    pub id: String,
    pub device_id: String,

    /// YYYY-MM-DD
    pub reading_date: String,

    /// HH:MM slot
    pub reading_time: String,

    pub temperature: f64,

    /// Created by backfill or the daily generator rather than a person
    pub is_generated: bool,

    pub recorded_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}
