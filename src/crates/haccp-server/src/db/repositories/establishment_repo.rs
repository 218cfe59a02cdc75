//! Establishment repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::Establishment;
use crate::db::repositories::Page;
use chrono::Utc;

/// Establishment repository for managing site rows
pub struct EstablishmentRepository;

impl EstablishmentRepository {
    /// Insert a new establishment
    pub async fn create(
        pool: &DatabasePool,
        establishment: &Establishment,
    ) -> Result<Establishment, sqlx::Error> {
        sqlx::query_as::<_, Establishment>(
            "INSERT INTO establishments
                (id, business_id, name, address, city, establishment_type, registration_number, seats, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&establishment.id)
        .bind(&establishment.business_id)
        .bind(&establishment.name)
        .bind(&establishment.address)
        .bind(&establishment.city)
        .bind(&establishment.establishment_type)
        .bind(&establishment.registration_number)
        .bind(establishment.seats)
        .bind(&establishment.created_at)
        .bind(&establishment.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(
        pool: &DatabasePool,
        id: &str,
    ) -> Result<Option<Establishment>, sqlx::Error> {
        sqlx::query_as::<_, Establishment>("SELECT * FROM establishments WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Owning user of an establishment, `None` when it does not exist
    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM establishments e
             JOIN businesses b ON b.id = e.business_id
             WHERE e.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// List establishments visible to `owner`, optionally for one business
    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        business_id: Option<&str>,
        page: Page,
    ) -> Result<Vec<Establishment>, sqlx::Error> {
        sqlx::query_as::<_, Establishment>(
            "SELECT e.* FROM establishments e
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR e.business_id = ?2)
             ORDER BY e.name ASC LIMIT ?3 OFFSET ?4",
        )
        .bind(owner)
        .bind(business_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(
        pool: &DatabasePool,
        owner: Option<&str>,
        business_id: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM establishments e
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR e.business_id = ?2)",
        )
        .bind(owner)
        .bind(business_id)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    /// Save edited fields
    pub async fn update(
        pool: &DatabasePool,
        establishment: &Establishment,
    ) -> Result<Establishment, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, Establishment>(
            "UPDATE establishments
             SET name = ?, address = ?, city = ?, establishment_type = ?, registration_number = ?, seats = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&establishment.name)
        .bind(&establishment.address)
        .bind(&establishment.city)
        .bind(&establishment.establishment_type)
        .bind(&establishment.registration_number)
        .bind(establishment.seats)
        .bind(&now)
        .bind(&establishment.id)
        .fetch_one(pool)
        .await
    }

    /// Delete an establishment; dependent rows go with it through foreign keys
    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM establishments WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
