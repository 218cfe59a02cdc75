//! API request handlers
//!
//! Provides handler functions for all API endpoints organized by resource.

pub mod admin;
pub mod auth;
pub mod businesses;
pub mod cleaning;
pub mod cron;
pub mod diary_devices;
pub mod eik;
pub mod establishments;
pub mod food;
pub mod health;
pub mod incoming_controls;
pub mod personnel;
pub mod temperature_logs;
pub mod temperature_readings;

pub use auth::{login, me, register};
pub use businesses::{create_business, delete_business, get_business, list_businesses, update_business};
pub use diary_devices::{create_device, delete_device, get_device, list_devices, update_device};
pub use eik::check_eik;
pub use establishments::{
    create_establishment, delete_establishment, get_establishment, list_establishments,
    update_establishment,
};
pub use health::{health, health_detailed};
pub use incoming_controls::{create_control, delete_control, get_control, list_controls, update_control};
pub use personnel::{
    create_personnel, delete_personnel, get_personnel, health_books, list_personnel, update_personnel,
};
pub use temperature_readings::{create_reading, delete_reading, get_reading, list_readings};
