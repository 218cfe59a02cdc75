//! Food item and food diary API models

use chrono::Utc;
use haccp_core::EquipmentType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::{
    validate_date, validate_not_empty, validate_one_of, validate_slot, validate_string_length,
    validate_temperature, validate_uuid,
};
use crate::api::models::non_blank;
use crate::db::models::{FoodDiaryEntry, FoodItem};

/// Accepted food categories
pub const FOOD_CATEGORIES: &[&str] = &[
    "hot_dish",
    "cold_dish",
    "dessert",
    "salad",
    "beverage",
    "raw_material",
];

fn validate_storage(value: &str) -> ApiResult<()> {
    value
        .parse::<EquipmentType>()
        .map(|_| ())
        .map_err(|_| ApiError::ValidationError(format!("Unknown storage_type: {}", value)))
}

/// Request to add a food item to an establishment's menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFoodItemRequest {
    pub establishment_id: String,
    pub name: String,
    pub category: String,
    /// Equipment type the item is held in
    pub storage_type: String,
}

impl CreateFoodItemRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.establishment_id)?;
        validate_not_empty(&self.name, "name")?;
        validate_string_length(self.name.trim(), "name", 1, 255)?;
        validate_one_of(&self.category, "category", FOOD_CATEGORIES)?;
        validate_storage(&self.storage_type)
    }

    pub fn into_item(self) -> FoodItem {
        let now = Utc::now().to_rfc3339();
        FoodItem {
            id: Uuid::new_v4().to_string(),
            establishment_id: self.establishment_id,
            name: self.name.trim().to_string(),
            category: self.category,
            storage_type: self.storage_type,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request to update a food item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFoodItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub storage_type: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateFoodItemRequest {
    pub fn has_updates(&self) -> bool {
        self.name.is_some() || self.category.is_some() || self.storage_type.is_some() || self.is_active.is_some()
    }

    pub fn apply(self, item: &mut FoodItem) -> ApiResult<()> {
        if !self.has_updates() {
            return Err(ApiError::BadRequest("No fields to update".to_string()));
        }
        if let Some(name) = self.name {
            validate_not_empty(&name, "name")?;
            validate_string_length(name.trim(), "name", 1, 255)?;
            item.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            validate_one_of(&category, "category", FOOD_CATEGORIES)?;
            item.category = category;
        }
        if let Some(storage) = self.storage_type {
            validate_storage(&storage)?;
            item.storage_type = storage;
        }
        if let Some(active) = self.is_active {
            item.is_active = active;
        }
        Ok(())
    }
}

/// Query parameters for listing food items
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodItemListQuery {
    pub establishment_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request to record a food temperature check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFoodDiaryRequest {
    pub food_item_id: String,
    pub entry_date: String,
    pub entry_time: String,
    pub temperature: f64,
    pub portions: Option<i64>,
    pub notes: Option<String>,
}

impl CreateFoodDiaryRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_uuid(&self.food_item_id)?;
        validate_date(&self.entry_date, "entry_date")?;
        validate_slot(&self.entry_time, "entry_time")?;
        validate_temperature(self.temperature, "temperature")?;
        if matches!(self.portions, Some(n) if n < 0) {
            return Err(ApiError::ValidationError("portions cannot be negative".to_string()));
        }
        Ok(())
    }

    pub fn into_entry(self) -> FoodDiaryEntry {
        FoodDiaryEntry {
            id: Uuid::new_v4().to_string(),
            food_item_id: self.food_item_id,
            entry_date: self.entry_date,
            entry_time: self.entry_time,
            temperature: self.temperature,
            portions: self.portions,
            is_generated: false,
            notes: non_blank(self.notes),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Query parameters for listing food diary entries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodDiaryListQuery {
    pub food_item_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
