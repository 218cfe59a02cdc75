//! Incoming goods control repository

use crate::db::connection::DatabasePool;
use crate::db::models::IncomingControl;
use crate::db::repositories::{DateWindow, Page};
use chrono::Utc;

/// Repository for delivery inspection rows
pub struct IncomingControlRepository;

impl IncomingControlRepository {
    pub async fn create(
        pool: &DatabasePool,
        control: &IncomingControl,
    ) -> Result<IncomingControl, sqlx::Error> {
        sqlx::query_as::<_, IncomingControl>(
            "INSERT INTO incoming_controls
                (id, establishment_id, received_on, supplier, product_name, batch_number, quantity, unit,
                 temperature, expiry_date, document_number, is_accepted, checked_by, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&control.id)
        .bind(&control.establishment_id)
        .bind(&control.received_on)
        .bind(&control.supplier)
        .bind(&control.product_name)
        .bind(&control.batch_number)
        .bind(control.quantity)
        .bind(&control.unit)
        .bind(control.temperature)
        .bind(&control.expiry_date)
        .bind(&control.document_number)
        .bind(control.is_accepted)
        .bind(&control.checked_by)
        .bind(&control.notes)
        .bind(&control.created_at)
        .bind(&control.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(
        pool: &DatabasePool,
        id: &str,
    ) -> Result<Option<IncomingControl>, sqlx::Error> {
        sqlx::query_as::<_, IncomingControl>("SELECT * FROM incoming_controls WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM incoming_controls c
             JOIN establishments e ON e.id = c.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE c.id = ?",
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
        window: &DateWindow,
        page: Page,
    ) -> Result<Vec<IncomingControl>, sqlx::Error> {
        sqlx::query_as::<_, IncomingControl>(
            "SELECT c.* FROM incoming_controls c
             JOIN establishments e ON e.id = c.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR c.establishment_id = ?2)
               AND (?3 IS NULL OR c.received_on >= ?3)
               AND (?4 IS NULL OR c.received_on <= ?4)
             ORDER BY c.received_on DESC, c.created_at DESC LIMIT ?5 OFFSET ?6",
        )
        .bind(owner)
        .bind(establishment_id)
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
        establishment_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM incoming_controls c
             JOIN establishments e ON e.id = c.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR c.establishment_id = ?2)
               AND (?3 IS NULL OR c.received_on >= ?3)
               AND (?4 IS NULL OR c.received_on <= ?4)",
        )
        .bind(owner)
        .bind(establishment_id)
        .bind(&window.from)
        .bind(&window.to)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    pub async fn update(
        pool: &DatabasePool,
        control: &IncomingControl,
    ) -> Result<IncomingControl, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, IncomingControl>(
            "UPDATE incoming_controls
             SET received_on = ?, supplier = ?, product_name = ?, batch_number = ?, quantity = ?, unit = ?,
                 temperature = ?, expiry_date = ?, document_number = ?, is_accepted = ?, checked_by = ?,
                 notes = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&control.received_on)
        .bind(&control.supplier)
        .bind(&control.product_name)
        .bind(&control.batch_number)
        .bind(control.quantity)
        .bind(&control.unit)
        .bind(control.temperature)
        .bind(&control.expiry_date)
        .bind(&control.document_number)
        .bind(control.is_accepted)
        .bind(&control.checked_by)
        .bind(&control.notes)
        .bind(&now)
        .bind(&control.id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM incoming_controls WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
