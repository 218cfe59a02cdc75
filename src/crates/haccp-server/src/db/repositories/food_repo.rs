//! Food item and food diary repositories

use crate::db::connection::DatabasePool;
use crate::db::models::{FoodDiaryEntry, FoodItem};
use crate::db::repositories::{DateWindow, Page};
use chrono::Utc;

/// Repository for food items
pub struct FoodItemRepository;

impl FoodItemRepository {
    pub async fn create(pool: &DatabasePool, item: &FoodItem) -> Result<FoodItem, sqlx::Error> {
        sqlx::query_as::<_, FoodItem>(
            "INSERT INTO food_items
                (id, establishment_id, name, category, storage_type, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&item.id)
        .bind(&item.establishment_id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.storage_type)
        .bind(item.is_active)
        .bind(&item.created_at)
        .bind(&item.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<FoodItem>, sqlx::Error> {
        sqlx::query_as::<_, FoodItem>("SELECT * FROM food_items WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM food_items f
             JOIN establishments e ON e.id = f.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE f.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
        page: Page,
    ) -> Result<Vec<FoodItem>, sqlx::Error> {
        sqlx::query_as::<_, FoodItem>(
            "SELECT f.* FROM food_items f
             JOIN establishments e ON e.id = f.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR f.establishment_id = ?2)
             ORDER BY f.name ASC LIMIT ?3 OFFSET ?4",
        )
        .bind(owner)
        .bind(establishment_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM food_items f
             JOIN establishments e ON e.id = f.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR f.establishment_id = ?2)",
        )
        .bind(owner)
        .bind(establishment_id)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    /// Items still on the menu, for the daily generator
    pub async fn list_active(pool: &DatabasePool) -> Result<Vec<FoodItem>, sqlx::Error> {
        sqlx::query_as::<_, FoodItem>("SELECT * FROM food_items WHERE is_active = 1 ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn update(pool: &DatabasePool, item: &FoodItem) -> Result<FoodItem, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, FoodItem>(
            "UPDATE food_items
             SET name = ?, category = ?, storage_type = ?, is_active = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.storage_type)
        .bind(item.is_active)
        .bind(&now)
        .bind(&item.id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM food_items WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Repository for food diary entries
pub struct FoodDiaryRepository;

const INSERT_COLUMNS: &str = "(id, food_item_id, entry_date, entry_time, temperature, portions, is_generated, notes, created_at)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

impl FoodDiaryRepository {
    pub async fn create(pool: &DatabasePool, entry: &FoodDiaryEntry) -> Result<FoodDiaryEntry, sqlx::Error> {
        let sql = format!("INSERT INTO food_diary {INSERT_COLUMNS} RETURNING *");
        sqlx::query_as::<_, FoodDiaryEntry>(&sql)
            .bind(&entry.id)
            .bind(&entry.food_item_id)
            .bind(&entry.entry_date)
            .bind(&entry.entry_time)
            .bind(entry.temperature)
            .bind(entry.portions)
            .bind(entry.is_generated)
            .bind(&entry.notes)
            .bind(&entry.created_at)
            .fetch_one(pool)
            .await
    }

    /// Insert unless the item already has an entry at that date and time
    pub async fn insert_if_absent(pool: &DatabasePool, entry: &FoodDiaryEntry) -> Result<bool, sqlx::Error> {
        let sql = format!("INSERT OR IGNORE INTO food_diary {INSERT_COLUMNS}");
        let result = sqlx::query(&sql)
            .bind(&entry.id)
            .bind(&entry.food_item_id)
            .bind(&entry.entry_date)
            .bind(&entry.entry_time)
            .bind(entry.temperature)
            .bind(entry.portions)
            .bind(entry.is_generated)
            .bind(&entry.notes)
            .bind(&entry.created_at)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM food_diary d
             JOIN food_items f ON f.id = d.food_item_id
             JOIN establishments e ON e.id = f.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE d.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        food_item_id: Option<&str>,
        window: &DateWindow,
        page: Page,
    ) -> Result<Vec<FoodDiaryEntry>, sqlx::Error> {
        sqlx::query_as::<_, FoodDiaryEntry>(
            "SELECT d.* FROM food_diary d
             JOIN food_items f ON f.id = d.food_item_id
             JOIN establishments e ON e.id = f.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR d.food_item_id = ?2)
               AND (?3 IS NULL OR d.entry_date >= ?3)
               AND (?4 IS NULL OR d.entry_date <= ?4)
             ORDER BY d.entry_date DESC, d.entry_time DESC LIMIT ?5 OFFSET ?6",
        )
        .bind(owner)
        .bind(food_item_id)
        .bind(&window.from)
        .bind(&window.to)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(
        pool: &DatabasePool,
        owner: Option<&str>,
        food_item_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM food_diary d
             JOIN food_items f ON f.id = d.food_item_id
             JOIN establishments e ON e.id = f.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR d.food_item_id = ?2)
               AND (?3 IS NULL OR d.entry_date >= ?3)
               AND (?4 IS NULL OR d.entry_date <= ?4)",
        )
        .bind(owner)
        .bind(food_item_id)
        .bind(&window.from)
        .bind(&window.to)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM food_diary WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_all(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_diary")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
