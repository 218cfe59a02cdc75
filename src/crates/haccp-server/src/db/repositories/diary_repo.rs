//! Diary device and temperature reading repositories

use sqlx::{Executor, Sqlite};

use crate::db::connection::DatabasePool;
use crate::db::models::{DiaryDevice, TemperatureReading};
use crate::db::repositories::{DateWindow, Page};
use chrono::Utc;

/// Repository for temperature-tracked devices
pub struct DiaryDeviceRepository;

impl DiaryDeviceRepository {
    /// Insert a device; usable inside a transaction
    pub async fn create<'e, E>(executor: E, device: &DiaryDevice) -> Result<DiaryDevice, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, DiaryDevice>(
            "INSERT INTO diary_devices
                (id, establishment_id, name, device_type, min_temp, max_temp, location, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&device.id)
        .bind(&device.establishment_id)
        .bind(&device.name)
        .bind(&device.device_type)
        .bind(device.min_temp)
        .bind(device.max_temp)
        .bind(&device.location)
        .bind(device.is_active)
        .bind(&device.created_at)
        .bind(&device.updated_at)
        .fetch_one(executor)
        .await
    }

    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<DiaryDevice>, sqlx::Error> {
        sqlx::query_as::<_, DiaryDevice>("SELECT * FROM diary_devices WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Owning user of a device
    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM diary_devices d
             JOIN establishments e ON e.id = d.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE d.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Devices visible to `owner`, optionally for one establishment
    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        establishment_id: Option<&str>,
        page: Page,
    ) -> Result<Vec<DiaryDevice>, sqlx::Error> {
        sqlx::query_as::<_, DiaryDevice>(
            "SELECT d.* FROM diary_devices d
             JOIN establishments e ON e.id = d.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR d.establishment_id = ?2)
             ORDER BY d.name ASC LIMIT ?3 OFFSET ?4",
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
            "SELECT COUNT(*) FROM diary_devices d
             JOIN establishments e ON e.id = d.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR d.establishment_id = ?2)",
        )
        .bind(owner)
        .bind(establishment_id)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    /// Devices still in service, for the daily generator
    pub async fn list_active(pool: &DatabasePool) -> Result<Vec<DiaryDevice>, sqlx::Error> {
        sqlx::query_as::<_, DiaryDevice>("SELECT * FROM diary_devices WHERE is_active = 1 ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Save edited fields
    pub async fn update(pool: &DatabasePool, device: &DiaryDevice) -> Result<DiaryDevice, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, DiaryDevice>(
            "UPDATE diary_devices
             SET name = ?, device_type = ?, min_temp = ?, max_temp = ?, location = ?, is_active = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&device.name)
        .bind(&device.device_type)
        .bind(device.min_temp)
        .bind(device.max_temp)
        .bind(&device.location)
        .bind(device.is_active)
        .bind(&now)
        .bind(&device.id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diary_devices WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_all(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM diary_devices")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}

/// Repository for device diary readings
pub struct TemperatureReadingRepository;

impl TemperatureReadingRepository {
    /// Insert a reading; a duplicate slot is a constraint violation
    pub async fn create(
        pool: &DatabasePool,
        reading: &TemperatureReading,
    ) -> Result<TemperatureReading, sqlx::Error> {
        sqlx::query_as::<_, TemperatureReading>(
            "INSERT INTO temperature_readings
                (id, device_id, reading_date, reading_time, temperature, is_generated, recorded_by, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&reading.id)
        .bind(&reading.device_id)
        .bind(&reading.reading_date)
        .bind(&reading.reading_time)
        .bind(reading.temperature)
        .bind(reading.is_generated)
        .bind(&reading.recorded_by)
        .bind(&reading.notes)
        .bind(&reading.created_at)
        .fetch_one(pool)
        .await
    }

    /// Insert unless the (device, date, slot) is already recorded
    ///
    /// Returns whether a row was written.
    pub async fn insert_if_absent<'e, E>(
        executor: E,
        reading: &TemperatureReading,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO temperature_readings
                (id, device_id, reading_date, reading_time, temperature, is_generated, recorded_by, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&reading.id)
        .bind(&reading.device_id)
        .bind(&reading.reading_date)
        .bind(&reading.reading_time)
        .bind(reading.temperature)
        .bind(reading.is_generated)
        .bind(&reading.recorded_by)
        .bind(&reading.notes)
        .bind(&reading.created_at)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_by_id(
        pool: &DatabasePool,
        id: &str,
    ) -> Result<Option<TemperatureReading>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureReading>("SELECT * FROM temperature_readings WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Owning user of a reading
    pub async fn owner_of(pool: &DatabasePool, id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT b.user_id FROM temperature_readings r
             JOIN diary_devices d ON d.id = r.device_id
             JOIN establishments e ON e.id = d.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE r.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Readings visible to `owner`, newest first
    pub async fn list(
        pool: &DatabasePool,
        owner: Option<&str>,
        device_id: Option<&str>,
        window: &DateWindow,
        page: Page,
    ) -> Result<Vec<TemperatureReading>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureReading>(
            "SELECT r.* FROM temperature_readings r
             JOIN diary_devices d ON d.id = r.device_id
             JOIN establishments e ON e.id = d.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR r.device_id = ?2)
               AND (?3 IS NULL OR r.reading_date >= ?3)
               AND (?4 IS NULL OR r.reading_date <= ?4)
             ORDER BY r.reading_date DESC, r.reading_time DESC LIMIT ?5 OFFSET ?6",
        )
        .bind(owner)
        .bind(device_id)
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
        device_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM temperature_readings r
             JOIN diary_devices d ON d.id = r.device_id
             JOIN establishments e ON e.id = d.establishment_id
             JOIN businesses b ON b.id = e.business_id
             WHERE (?1 IS NULL OR b.user_id = ?1)
               AND (?2 IS NULL OR r.device_id = ?2)
               AND (?3 IS NULL OR r.reading_date >= ?3)
               AND (?4 IS NULL OR r.reading_date <= ?4)",
        )
        .bind(owner)
        .bind(device_id)
        .bind(&window.from)
        .bind(&window.to)
        .fetch_one(pool)
        .await?;
        Ok(result.0)
    }

    /// Number of readings recorded for a device
    pub async fn count_for_device(pool: &DatabasePool, device_id: &str) -> Result<i64, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM temperature_readings WHERE device_id = ?")
                .bind(device_id)
                .fetch_one(pool)
                .await?;
        Ok(result.0)
    }

    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM temperature_readings WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_all(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM temperature_readings")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
