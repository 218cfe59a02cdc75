//! Repository pattern implementations for database access
//!
//! One repository per aggregate. Reads that are scoped to a tenant take an
//! optional owner id: `None` means unrestricted (administrators).

pub mod business_repo;
pub mod cleaning_repo;
pub mod diary_repo;
pub mod establishment_repo;
pub mod food_repo;
pub mod incoming_control_repo;
pub mod personnel_repo;
pub mod temperature_log_repo;
pub mod user_repo;

pub use business_repo::BusinessRepository;
pub use cleaning_repo::CleaningRepository;
pub use diary_repo::{DiaryDeviceRepository, TemperatureReadingRepository};
pub use establishment_repo::EstablishmentRepository;
pub use food_repo::{FoodDiaryRepository, FoodItemRepository};
pub use incoming_control_repo::IncomingControlRepository;
pub use personnel_repo::PersonnelRepository;
pub use temperature_log_repo::TemperatureLogRepository;
pub use user_repo::UserRepository;

/// LIMIT/OFFSET window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Window for a 0-based page number
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            limit: i64::from(per_page),
            offset: i64::from(page) * i64::from(per_page),
        }
    }
}

/// Optional inclusive date window (YYYY-MM-DD strings compare lexically)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub from: Option<String>,
    pub to: Option<String>,
}
