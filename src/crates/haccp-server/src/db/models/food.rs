//! Food item and food diary models

use haccp_core::EquipmentType;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product kept and served by an establishment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: String,
    pub establishment_id: String,
    pub name: String,

    /// hot_dish, cold_dish, dessert, salad, beverage, raw_material
    pub category: String,

    /// Equipment the item is held in; decides its temperature range
    pub storage_type: String,

    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl FoodItem {
    pub fn storage(&self) -> Option<EquipmentType> {
        self.storage_type.parse().ok()
    }
}

/// A food diary row: the item's temperature at a slot on a date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodDiaryEntry {
    pub id: String,
    pub food_item_id: String,
    pub entry_date: String,
    pub entry_time: String,
    pub temperature: f64,
    pub portions: Option<i64>,
    pub is_generated: bool,
    pub notes: Option<String>,
    pub created_at: String,
}
