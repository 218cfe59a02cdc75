//! Temperature log repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::TemperatureLog;
use crate::db::repositories::{DateWindow, Page};

/// Equipment known to a business's temperature log
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LoggedEquipment {
    pub equipment_name: String,
    pub equipment_type: String,
    pub establishment_id: Option<String>,
}

/// Repository for business-level temperature journal rows
pub struct TemperatureLogRepository;

const INSERT_COLUMNS: &str = "(id, business_id, establishment_id, equipment_name, equipment_type, log_date, log_time, temperature, is_generated, recorded_by, notes, created_at)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

impl TemperatureLogRepository {
    /// Insert a log row; a duplicate (establishment, equipment, date, time) is a constraint violation
    pub async fn create(pool: &DatabasePool, log: &TemperatureLog) -> Result<TemperatureLog, sqlx::Error> {
        let sql = format!("INSERT INTO temperature_logs {INSERT_COLUMNS} RETURNING *");
        sqlx::query_as::<_, TemperatureLog>(&sql)
            .bind(&log.id)
            .bind(&log.business_id)
            .bind(&log.establishment_id)
            .bind(&log.equipment_name)
            .bind(&log.equipment_type)
            .bind(&log.log_date)
            .bind(&log.log_time)
            .bind(log.temperature)
            .bind(log.is_generated)
            .bind(&log.recorded_by)
            .bind(&log.notes)
            .bind(&log.created_at)
            .fetch_one(pool)
            .await
    }

    /// Insert unless that equipment already has a row for the date and time
    pub async fn insert_if_absent(pool: &DatabasePool, log: &TemperatureLog) -> Result<bool, sqlx::Error> {
        let sql = format!("INSERT OR IGNORE INTO temperature_logs {INSERT_COLUMNS}");
        let result = sqlx::query(&sql)
            .bind(&log.id)
            .bind(&log.business_id)
            .bind(&log.establishment_id)
            .bind(&log.equipment_name)
            .bind(&log.equipment_type)
            .bind(&log.log_date)
            .bind(&log.log_time)
            .bind(log.temperature)
            .bind(log.is_generated)
            .bind(&log.recorded_by)
            .bind(&log.notes)
            .bind(&log.created_at)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<TemperatureLog>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureLog>("SELECT * FROM temperature_logs WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Owning user of a log row
    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM temperature_logs l
             JOIN businesses b ON b.id = l.business_id
             WHERE l.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Distinct equipment ever logged by a business, keyed by establishment and name
    ///
    /// When the same equipment appears with several types, the most recent row wins.
    pub async fn equipment_for_business(
        pool: &DatabasePool,
        business_id: &str,
    ) -> Result<Vec<LoggedEquipment>, sqlx::Error> {
        sqlx::query_as::<_, LoggedEquipment>(
            "SELECT l.equipment_name, l.equipment_type, l.establishment_id
             FROM temperature_logs l
             WHERE l.business_id = ?1
               AND l.rowid = (
                   SELECT l2.rowid FROM temperature_logs l2
                   WHERE l2.business_id = ?1
                     AND l2.establishment_id IS l.establishment_id
                     AND l2.equipment_name = l.equipment_name
                   ORDER BY l2.log_date DESC, l2.log_time DESC, l2.rowid DESC
                   LIMIT 1)
             ORDER BY l.establishment_id ASC, l.equipment_name ASC",
        )
        .bind(business_id)
        .fetch_all(pool)
        .await
    }

    /// Log rows visible to `owner`, newest first
    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        business_id: Option<&str>,
        window: &DateWindow,
        page: Page,
    ) -> Result<Vec<TemperatureLog>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureLog>(
            "SELECT l.* FROM temperature_logs l
             JOIN businesses b ON b.id = l.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR l.business_id = ?2)
               AND (?3 IS NULL OR l.log_date >= ?3)
               AND (?4 IS NULL OR l.log_date <= ?4)
             ORDER BY l.log_date DESC, l.log_time DESC, l.equipment_name ASC LIMIT ?5 OFFSET ?6",
        )
        .bind(owner)
        .bind(business_id)
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
        business_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM temperature_logs l
             JOIN businesses b ON b.id = l.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR l.business_id = ?2)
               AND (?3 IS NULL OR l.log_date >= ?3)
               AND (?4 IS NULL OR l.log_date <= ?4)",
        )
        .bind(owner)
        .bind(business_id)
        .bind(&window.from)
        .bind(&window.to)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM temperature_logs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_all(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM temperature_logs")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
