//! Personnel repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::Personnel;
use crate::db::repositories::Page;
use chrono::Utc;

/// Personnel repository for managing staff rows
pub struct PersonnelRepository;

impl PersonnelRepository {
    /// Insert a staff member
    pub async fn create(pool: &DatabasePool, person: &Personnel) -> Result<Personnel, sqlx::Error> {
        sqlx::query_as::<_, Personnel>(
            "INSERT INTO personnel
                (id, establishment_id, full_name, position, phone, health_book_number, health_book_expiry, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&person.id)
        .bind(&person.establishment_id)
        .bind(&person.full_name)
        .bind(&person.position)
        .bind(&person.phone)
        .bind(&person.health_book_number)
        .bind(&person.health_book_expiry)
        .bind(person.is_active)
        .bind(&person.created_at)
        .bind(&person.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<Personnel>, sqlx::Error> {
        sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Owning user of a staff row
    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM personnel p
             JOIN establishments e ON e.id = p.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// All staff visible to `owner`, optionally for one establishment
    ///
    /// Not paginated in SQL: health-book status is derived per row, so the
    /// caller filters and pages in memory.
    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
    ) -> Result<Vec<Personnel>, sqlx::Error> {
        sqlx::query_as::<_, Personnel>(
            "SELECT p.* FROM personnel p
             JOIN establishments e ON e.id = p.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR p.establishment_id = ?2)
             ORDER BY p.full_name ASC",
        )
        .bind(owner)
        .bind(establishment_id)
        .fetch_all(pool)
        .await
    }

    /// Save edited fields
    pub async fn update(pool: &DatabasePool, person: &Personnel) -> Result<Personnel, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, Personnel>(
            "UPDATE personnel
             SET full_name = ?, position = ?, phone = ?, health_book_number = ?, health_book_expiry = ?, is_active = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&person.full_name)
        .bind(&person.position)
        .bind(&person.phone)
        .bind(&person.health_book_number)
        .bind(&person.health_book_expiry)
        .bind(person.is_active)
        .bind(&now)
        .bind(&person.id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personnel WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all staff rows
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM personnel")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
