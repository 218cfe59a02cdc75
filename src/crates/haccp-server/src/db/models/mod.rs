//! Database models
//!
//! Row types for persistent storage. Timestamps are stored as RFC 3339
//! strings, calendar dates as `YYYY-MM-DD` and slot times as `HH:MM`
//! (TEXT in SQLite).

pub mod business;
pub mod cleaning;
pub mod diary;
pub mod establishment;
pub mod food;
pub mod incoming_control;
pub mod personnel;
pub mod temperature_log;
pub mod user;

pub use business::Business;
pub use cleaning::{CleaningLog, CleaningTemplate};
pub use diary::{DiaryDevice, TemperatureReading};
pub use establishment::Establishment;
pub use food::{FoodDiaryEntry, FoodItem};
pub use incoming_control::IncomingControl;
pub use personnel::Personnel;
pub use temperature_log::TemperatureLog;
pub use user::User;
