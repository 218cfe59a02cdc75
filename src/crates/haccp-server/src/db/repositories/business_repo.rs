//! Business repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::Business;
use crate::db::repositories::Page;
use chrono::Utc;

/// Business repository for managing company rows
pub struct BusinessRepository;

/// Child tables cleared before the business row itself, leaves first
const CASCADE_DELETES: [&str; 10] = [
    "DELETE FROM temperature_readings WHERE device_id IN (
         SELECT d.id FROM diary_devices d
         JOIN establishments e ON e.id = d.establishment_id
         WHERE e.business_id = ?)",
    "DELETE FROM diary_devices WHERE establishment_id IN (
         SELECT id FROM establishments WHERE business_id = ?)",
    "DELETE FROM food_diary WHERE food_item_id IN (
         SELECT f.id FROM food_items f
         JOIN establishments e ON e.id = f.establishment_id
         WHERE e.business_id = ?)",
    "DELETE FROM food_items WHERE establishment_id IN (
         SELECT id FROM establishments WHERE business_id = ?)",
    "DELETE FROM cleaning_logs WHERE establishment_id IN (
         SELECT id FROM establishments WHERE business_id = ?)",
    "DELETE FROM cleaning_templates WHERE establishment_id IN (
         SELECT id FROM establishments WHERE business_id = ?)",
    "DELETE FROM incoming_controls WHERE establishment_id IN (
         SELECT id FROM establishments WHERE business_id = ?)",
    "DELETE FROM personnel WHERE establishment_id IN (
         SELECT id FROM establishments WHERE business_id = ?)",
    "DELETE FROM temperature_logs WHERE business_id = ?",
    "DELETE FROM establishments WHERE business_id = ?",
];

impl BusinessRepository {
    /// Insert a new business
    pub async fn create(pool: &DatabasePool, business: &Business) -> Result<Business, sqlx::Error> {
        sqlx::query_as::<_, Business>(
            "INSERT INTO businesses (id, user_id, name, eik, address, phone, email, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&business.id)
        .bind(&business.user_id)
        .bind(&business.name)
        .bind(&business.eik)
        .bind(&business.address)
        .bind(&business.phone)
        .bind(&business.email)
        .bind(&business.created_at)
        .bind(&business.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<Business>, sqlx::Error> {
        sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List businesses, optionally restricted to one owner
    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        page: Page,
    ) -> Result<Vec<Business>, sqlx::Error> {
        sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses
             WHERE (?1 IS NULL OR user_id = ?1)
             ORDER BY name ASC LIMIT ?2 OFFSET ?3",
        )
        .bind(owner)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &DatabasePool, owner: Option<&str>) -> Result<i64, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM businesses WHERE (?1 IS NULL OR user_id = ?1)")
                .bind(owner)
                .fetch_one(pool)
                .await?;
        Ok(result.0)
    }

    /// Every business id, for the daily generators
    pub async fn list_ids(pool: &DatabasePool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM businesses ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Save edited fields
    pub async fn update(pool: &DatabasePool, business: &Business) -> Result<Business, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, Business>(
            "UPDATE businesses SET name = ?, eik = ?, address = ?, phone = ?, email = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&business.name)
        .bind(&business.eik)
        .bind(&business.address)
        .bind(&business.phone)
        .bind(&business.email)
        .bind(&now)
        .bind(&business.id)
        .fetch_one(pool)
        .await
    }

    /// Delete a business together with everything recorded under it
    ///
    /// Runs in one transaction; returns the number of rows removed.
    pub async fn delete_cascade(pool: &DatabasePool, id: &str) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut removed = 0;

        for statement in CASCADE_DELETES {
            removed += sqlx::query(statement)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        let result = sqlx::query("DELETE FROM businesses WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(sqlx::Error::RowNotFound);
        }
        removed += result.rows_affected();

        tx.commit().await?;
        Ok(removed)
    }
}
