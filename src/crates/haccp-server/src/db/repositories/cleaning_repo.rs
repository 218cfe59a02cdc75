//! Cleaning template and cleaning log repository

use crate::db::connection::DatabasePool;
use crate::db::models::{CleaningLog, CleaningTemplate};
use crate::db::repositories::{DateWindow, Page};
use chrono::Utc;

/// Repository for cleaning schedules and their performed entries
pub struct CleaningRepository;

impl CleaningRepository {
    pub async fn create_template(
        pool: &DatabasePool,
        template: &CleaningTemplate,
    ) -> Result<CleaningTemplate, sqlx::Error> {
        sqlx::query_as::<_, CleaningTemplate>(
            "INSERT INTO cleaning_templates
                (id, establishment_id, area, task, frequency, disinfectant, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&template.id)
        .bind(&template.establishment_id)
        .bind(&template.area)
        .bind(&template.task)
        .bind(&template.frequency)
        .bind(&template.disinfectant)
        .bind(template.is_active)
        .bind(&template.created_at)
        .bind(&template.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_template(
        pool: &DatabasePool,
        id: &str,
    ) -> Result<Option<CleaningTemplate>, sqlx::Error> {
        sqlx::query_as::<_, CleaningTemplate>("SELECT * FROM cleaning_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn template_owner(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM cleaning_templates t
             JOIN establishments e ON e.id = t.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE t.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn list_templates(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
        page: Page,
    ) -> Result<Vec<CleaningTemplate>, sqlx::Error> {
        sqlx::query_as::<_, CleaningTemplate>(
            "SELECT t.* FROM cleaning_templates t
             JOIN establishments e ON e.id = t.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR t.establishment_id = ?2)
             ORDER BY t.area ASC, t.task ASC LIMIT ?3 OFFSET ?4",
        )
        .bind(owner)
        .bind(establishment_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_templates(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM cleaning_templates t
             JOIN establishments e ON e.id = t.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR t.establishment_id = ?2)",
        )
        .bind(owner)
        .bind(establishment_id)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    pub async fn update_template(
        pool: &DatabasePool,
        template: &CleaningTemplate,
    ) -> Result<CleaningTemplate, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, CleaningTemplate>(
            "UPDATE cleaning_templates
             SET area = ?, task = ?, frequency = ?, disinfectant = ?, is_active = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&template.area)
        .bind(&template.task)
        .bind(&template.frequency)
        .bind(&template.disinfectant)
        .bind(template.is_active)
        .bind(&now)
        .bind(&template.id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete_template(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cleaning_templates WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_log(pool: &DatabasePool, log: &CleaningLog) -> Result<CleaningLog, sqlx::Error> {
        sqlx::query_as::<_, CleaningLog>(
            "INSERT INTO cleaning_logs
                (id, establishment_id, template_id, area, task, performed_on, performed_by, status, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&log.id)
        .bind(&log.establishment_id)
        .bind(&log.template_id)
        .bind(&log.area)
        .bind(&log.task)
        .bind(&log.performed_on)
        .bind(&log.performed_by)
        .bind(&log.status)
        .bind(&log.notes)
        .bind(&log.created_at)
        .fetch_one(pool)
        .await
    }

    pub async fn log_owner(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM cleaning_logs l
             JOIN establishments e ON e.id = l.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE l.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn list_logs(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
        window: &DateWindow,
        page: Page,
    ) -> Result<Vec<CleaningLog>, sqlx::Error> {
        sqlx::query_as::<_, CleaningLog>(
            "SELECT l.* FROM cleaning_logs l
             JOIN establishments e ON e.id = l.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR l.establishment_id = ?2)
               AND (?3 IS NULL OR l.performed_on >= ?3)
               AND (?4 IS NULL OR l.performed_on <= ?4)
             ORDER BY l.performed_on DESC, l.created_at DESC LIMIT ?5 OFFSET ?6",
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

    pub async fn count_logs(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM cleaning_logs l
             JOIN establishments e ON e.id = l.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR l.establishment_id = ?2)
               AND (?3 IS NULL OR l.performed_on >= ?3)
               AND (?4 IS NULL OR l.performed_on <= ?4)",
        )
        .bind(owner)
        .bind(establishment_id)
        .bind(&window.from)
        .bind(&window.to)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    pub async fn delete_log(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cleaning_logs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_all_logs(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cleaning_logs")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
