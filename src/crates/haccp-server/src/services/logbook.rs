//! Logbook generation service
//!
//! Fills diaries with synthetic readings: the backfill done when a device is
//! registered, and the daily runs for device readings, business temperature
//! logs and food diaries. Every run is idempotent: a (subject, date, slot)
//! that already has a row is skipped.

use chrono::{Local, NaiveDate, Utc};
use haccp_core::{backfill_plan, EquipmentType, ReadingGenerator};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::LogbookConfig;
use crate::db::connection::DatabasePool;
use crate::db::models::{DiaryDevice, FoodDiaryEntry, TemperatureLog, TemperatureReading};
use crate::db::repositories::{
    BusinessRepository, DiaryDeviceRepository, FoodDiaryRepository, FoodItemRepository,
    TemperatureLogRepository, TemperatureReadingRepository,
};

/// Calendar date on the server clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Diary defaults shared by the generators
#[derive(Debug, Clone, PartialEq)]
pub struct LogbookSettings {
    pub backfill_days: u32,
    pub slots: Vec<String>,
    pub health_book_warn_days: i64,
}

impl From<&LogbookConfig> for LogbookSettings {
    fn from(config: &LogbookConfig) -> Self {
        Self {
            backfill_days: config.backfill_days,
            slots: config.slots.clone(),
            health_book_warn_days: config.health_book_warn_days,
        }
    }
}

impl Default for LogbookSettings {
    fn default() -> Self {
        Self::from(&LogbookConfig::default())
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Date the rows were generated for
    pub date: String,
    pub created: u64,
    /// Slots that already had a row
    pub skipped: u64,
}

impl GenerationSummary {
    fn for_date(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, inserted: bool) {
        if inserted {
            self.created += 1;
        } else {
            self.skipped += 1;
        }
    }
}

fn generated_reading(device_id: &str, date: NaiveDate, slot: &str, temperature: f64) -> TemperatureReading {
    TemperatureReading {
        id: Uuid::new_v4().to_string(),
        device_id: device_id.to_string(),
        reading_date: date.format("%Y-%m-%d").to_string(),
        reading_time: slot.to_string(),
        temperature,
        is_generated: true,
        recorded_by: None,
        notes: None,
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Diary generators
pub struct LogbookService;

impl LogbookService {
    /// Insert a device and backfill its diary in one transaction
    ///
    /// Returns the stored device and the number of readings created.
    pub async fn register_device(
        pool: &DatabasePool,
        device: &DiaryDevice,
        settings: &LogbookSettings,
        today: NaiveDate,
    ) -> Result<(DiaryDevice, u64), sqlx::Error> {
        let mut generator = ReadingGenerator::from_entropy();
        let mut tx = pool.begin().await?;

        let created = DiaryDeviceRepository::create(&mut *tx, device).await?;
        let range = created.range();

        let mut backfilled = 0;
        for (date, slot) in backfill_plan(today, settings.backfill_days, &settings.slots) {
            let reading = generated_reading(&created.id, date, &slot, generator.reading(range));
            if TemperatureReadingRepository::insert_if_absent(&mut *tx, &reading).await? {
                backfilled += 1;
            }
        }

        tx.commit().await?;
        info!("Registered device {} with {} backfilled readings", created.id, backfilled);
        Ok((created, backfilled))
    }

    /// Readings for every active device at every slot of `date`
    pub async fn generate_device_readings(
        pool: &DatabasePool,
        date: NaiveDate,
        slots: &[String],
    ) -> Result<GenerationSummary, sqlx::Error> {
        let mut generator = ReadingGenerator::from_entropy();
        let mut summary = GenerationSummary::for_date(date);

        for device in DiaryDeviceRepository::list_active(pool).await? {
            let range = device.range();
            for slot in slots {
                let reading = generated_reading(&device.id, date, slot, generator.reading(range));
                summary.record(TemperatureReadingRepository::insert_if_absent(pool, &reading).await?);
            }
        }

        info!(
            "Device readings for {}: {} created, {} skipped",
            summary.date, summary.created, summary.skipped
        );
        Ok(summary)
    }

    /// Log rows for every equipment already in a business's temperature log
    ///
    /// With `business_id` of `None` every business is processed.
    pub async fn generate_temperature_logs(
        pool: &DatabasePool,
        business_id: Option<&str>,
        date: NaiveDate,
        slots: &[String],
    ) -> Result<GenerationSummary, sqlx::Error> {
        let businesses = match business_id {
            Some(id) => vec![id.to_string()],
            None => BusinessRepository::list_ids(pool).await?,
        };

        let mut generator = ReadingGenerator::from_entropy();
        let mut summary = GenerationSummary::for_date(date);
        let log_date = date.format("%Y-%m-%d").to_string();

        for business in &businesses {
            for equipment in TemperatureLogRepository::equipment_for_business(pool, business).await? {
                let Ok(kind) = equipment.equipment_type.parse::<EquipmentType>() else {
                    warn!(
                        "Skipping equipment {} of business {}: unknown type {}",
                        equipment.equipment_name, business, equipment.equipment_type
                    );
                    continue;
                };
                let range = kind.default_range();

                for slot in slots {
                    let log = TemperatureLog {
                        id: Uuid::new_v4().to_string(),
                        business_id: business.clone(),
                        establishment_id: equipment.establishment_id.clone(),
                        equipment_name: equipment.equipment_name.clone(),
                        equipment_type: kind.as_str().to_string(),
                        log_date: log_date.clone(),
                        log_time: slot.clone(),
                        temperature: generator.reading(range),
                        is_generated: true,
                        recorded_by: None,
                        notes: None,
                        created_at: Utc::now().to_rfc3339(),
                    };
                    summary.record(TemperatureLogRepository::insert_if_absent(pool, &log).await?);
                }
            }
        }

        info!(
            "Temperature logs for {} ({} businesses): {} created, {} skipped",
            summary.date,
            businesses.len(),
            summary.created,
            summary.skipped
        );
        Ok(summary)
    }

    /// Food diary rows for every active food item at every slot of `date`
    pub async fn generate_food_diary(
        pool: &DatabasePool,
        date: NaiveDate,
        slots: &[String],
    ) -> Result<GenerationSummary, sqlx::Error> {
        let mut generator = ReadingGenerator::from_entropy();
        let mut summary = GenerationSummary::for_date(date);
        let entry_date = date.format("%Y-%m-%d").to_string();

        for item in FoodItemRepository::list_active(pool).await? {
            let Some(storage) = item.storage() else {
                warn!("Skipping food item {}: unknown storage type {}", item.id, item.storage_type);
                continue;
            };
            let range = storage.default_range();

            for slot in slots {
                let entry = FoodDiaryEntry {
                    id: Uuid::new_v4().to_string(),
                    food_item_id: item.id.clone(),
                    entry_date: entry_date.clone(),
                    entry_time: slot.clone(),
                    temperature: generator.reading(range),
                    portions: None,
                    is_generated: true,
                    notes: None,
                    created_at: Utc::now().to_rfc3339(),
                };
                summary.record(FoodDiaryRepository::insert_if_absent(pool, &entry).await?);
            }
        }

        info!(
            "Food diary for {}: {} created, {} skipped",
            summary.date, summary.created, summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Business, Establishment, FoodItem, User};
    use crate::db::repositories::{EstablishmentRepository, UserRepository};
    use crate::db::DatabaseConnection;

    fn now() -> String {
        Utc::now().to_rfc3339()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_db() -> (DatabaseConnection, String, String) {
        let db = DatabaseConnection::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        let pool = db.pool();

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: "owner@example.bg".to_string(),
            password_hash: "x".to_string(),
            full_name: "Owner".to_string(),
            role: "user".to_string(),
            is_active: true,
            created_at: now(),
            updated_at: now(),
        };
        UserRepository::create(pool, &user).await.unwrap();

        let business = Business {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            name: "Sofia Foods".to_string(),
            eik: "831641791".to_string(),
            address: None,
            phone: None,
            email: None,
            created_at: now(),
            updated_at: now(),
        };
        BusinessRepository::create(pool, &business).await.unwrap();

        let establishment = Establishment {
            id: Uuid::new_v4().to_string(),
            business_id: business.id.clone(),
            name: "Bistro".to_string(),
            address: None,
            city: Some("Sofia".to_string()),
            establishment_type: "restaurant".to_string(),
            registration_number: None,
            seats: Some(40),
            created_at: now(),
            updated_at: now(),
        };
        EstablishmentRepository::create(pool, &establishment).await.unwrap();

        (db, business.id, establishment.id)
    }

    fn device(establishment_id: &str, device_type: &str, min: f64, max: f64) -> DiaryDevice {
        DiaryDevice {
            id: Uuid::new_v4().to_string(),
            establishment_id: establishment_id.to_string(),
            name: "Walk-in".to_string(),
            device_type: device_type.to_string(),
            min_temp: min,
            max_temp: max,
            location: None,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[tokio::test]
    async fn test_register_device_backfills_plan() {
        let (db, _, establishment_id) = seeded_db().await;
        let settings = LogbookSettings::default();

        let (created, backfilled) = LogbookService::register_device(
            db.pool(),
            &device(&establishment_id, "freezer", -36.0, -18.0),
            &settings,
            day(2024, 3, 15),
        )
        .await
        .unwrap();

        assert_eq!(backfilled, 30);
        assert_eq!(
            TemperatureReadingRepository::count_for_device(db.pool(), &created.id).await.unwrap(),
            30
        );

        let readings: Vec<TemperatureReading> =
            sqlx::query_as("SELECT * FROM temperature_readings WHERE device_id = ? ORDER BY reading_date")
                .bind(&created.id)
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(readings.first().unwrap().reading_date, "2024-03-01");
        assert_eq!(readings.last().unwrap().reading_date, "2024-03-15");
        assert!(readings
            .iter()
            .all(|r| r.is_generated && (-36.0..=-18.0).contains(&r.temperature)));
    }

    #[tokio::test]
    async fn test_register_device_rolls_back_on_failure() {
        let (db, _, _) = seeded_db().await;

        let orphan = device("no-such-establishment", "refrigerator", 0.0, 4.0);
        let result =
            LogbookService::register_device(db.pool(), &orphan, &LogbookSettings::default(), day(2024, 3, 15)).await;

        assert!(result.is_err());
        assert_eq!(TemperatureReadingRepository::count_all(db.pool()).await.unwrap(), 0);
        assert_eq!(DiaryDeviceRepository::count_all(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_device_generation_is_idempotent() {
        let (db, _, establishment_id) = seeded_db().await;
        let settings = LogbookSettings {
            backfill_days: 1,
            ..LogbookSettings::default()
        };
        LogbookService::register_device(
            db.pool(),
            &device(&establishment_id, "refrigerator", 0.0, 4.0),
            &settings,
            day(2024, 3, 15),
        )
        .await
        .unwrap();

        // The backfill already covered the 15th
        let same_day = LogbookService::generate_device_readings(db.pool(), day(2024, 3, 15), &settings.slots)
            .await
            .unwrap();
        assert_eq!(same_day.created, 0);
        assert_eq!(same_day.skipped, 2);

        let next_day = LogbookService::generate_device_readings(db.pool(), day(2024, 3, 16), &settings.slots)
            .await
            .unwrap();
        assert_eq!(next_day.created, 2);

        let again = LogbookService::generate_device_readings(db.pool(), day(2024, 3, 16), &settings.slots)
            .await
            .unwrap();
        assert_eq!(again.created, 0);
        assert_eq!(again.skipped, 2);
        assert_eq!(TemperatureReadingRepository::count_all(db.pool()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_temperature_log_generation_uses_known_equipment() {
        let (db, business_id, _) = seeded_db().await;
        let slots = LogbookSettings::default().slots;

        let manual = TemperatureLog {
            id: Uuid::new_v4().to_string(),
            business_id: business_id.clone(),
            establishment_id: None,
            equipment_name: "Display 1".to_string(),
            equipment_type: "hot_display".to_string(),
            log_date: "2024-03-14".to_string(),
            log_time: "10:00".to_string(),
            temperature: 70.0,
            is_generated: false,
            recorded_by: Some("Ivan".to_string()),
            notes: None,
            created_at: now(),
        };
        TemperatureLogRepository::create(db.pool(), &manual).await.unwrap();

        let summary =
            LogbookService::generate_temperature_logs(db.pool(), Some(&business_id), day(2024, 3, 15), &slots)
                .await
                .unwrap();
        assert_eq!(summary.created, 2);

        let again = LogbookService::generate_temperature_logs(db.pool(), None, day(2024, 3, 15), &slots)
            .await
            .unwrap();
        assert_eq!(again.created, 0);
        assert_eq!(again.skipped, 2);

        let rows: Vec<TemperatureLog> =
            sqlx::query_as("SELECT * FROM temperature_logs WHERE log_date = '2024-03-15'")
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert!(rows.iter().all(|r| (63.0..=80.0).contains(&r.temperature) && r.is_generated));
    }

    #[tokio::test]
    async fn test_food_diary_skips_inactive_items() {
        let (db, _, establishment_id) = seeded_db().await;
        let slots = LogbookSettings::default().slots;

        for (name, active) in [("Tarator", true), ("Banitsa", false)] {
            let item = FoodItem {
                id: Uuid::new_v4().to_string(),
                establishment_id: establishment_id.clone(),
                name: name.to_string(),
                category: "cold_dish".to_string(),
                storage_type: "refrigerator".to_string(),
                is_active: active,
                created_at: now(),
                updated_at: now(),
            };
            FoodItemRepository::create(db.pool(), &item).await.unwrap();
        }

        let summary = LogbookService::generate_food_diary(db.pool(), day(2024, 3, 15), &slots)
            .await
            .unwrap();
        assert_eq!(summary.created, 2);
        assert_eq!(summary.date, "2024-03-15");
        assert_eq!(FoodDiaryRepository::count_all(db.pool()).await.unwrap(), 2);

        let again = LogbookService::generate_food_diary(db.pool(), day(2024, 3, 15), &slots)
            .await
            .unwrap();
        assert_eq!(again.created, 0);
        assert_eq!(again.skipped, 2);
    }
}
