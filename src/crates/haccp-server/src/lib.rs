//! HACCP logbook server
//!
//! Multi-tenant REST service for food-service businesses: companies (by
//! EIK), establishments, personnel health books, temperature diaries,
//! goods receiving, cleaning and food diaries.

pub mod api;
pub mod config;
pub mod db;
pub mod services;
pub mod version;

/// Get version information
pub fn version() -> &'static str {
    version::VERSION
}
