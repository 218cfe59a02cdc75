//! Domain rules for HACCP record keeping
//!
//! This crate holds the pure, I/O-free pieces of the logbook server:
//! - EIK (Bulgarian company identifier) checksum validation
//! - Equipment types and their permitted temperature ranges
//! - Synthetic reading generation used to backfill diaries
//! - Health-book validity evaluation for personnel

pub mod eik;
pub mod equipment;
pub mod error;
pub mod generator;
pub mod health_book;

pub use eik::{is_valid_eik, validate_eik, Eik, EikError};
pub use equipment::{EquipmentType, TemperatureRange};
pub use error::{CoreError, Result};
pub use generator::{
    backfill_plan, generate_reading, parse_slot, ReadingGenerator, DEFAULT_BACKFILL_DAYS,
    DEFAULT_SLOTS,
};
pub use health_book::{HealthBookStatus, DEFAULT_WARN_DAYS};
