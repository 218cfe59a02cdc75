//! Request validation utilities
//!
//! Provides validation helpers for ensuring request data meets requirements.

use std::sync::OnceLock;

use chrono::NaiveDate;
use haccp_core::parse_slot;
use regex::Regex;

use crate::api::error::{ApiError, ApiResult};
use crate::db::repositories::DateWindow;

/// Plausible bounds for any measured temperature (Celsius)
pub const TEMPERATURE_LIMITS: (f64, f64) = (-60.0, 150.0);

/// Validate that a required string field is not blank
pub fn validate_not_empty(value: &str, field_name: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{} cannot be empty", field_name)));
    }
    Ok(())
}

/// Validate string length constraints (in characters)
pub fn validate_string_length(value: &str, field_name: &str, min: usize, max: usize) -> ApiResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ApiError::ValidationError(format!(
            "{} must be between {} and {} characters",
            field_name, min, max
        )));
    }
    Ok(())
}

/// Validate pagination parameters
pub fn validate_pagination(_page: u32, per_page: u32, max_per_page: u32) -> ApiResult<()> {
    if per_page == 0 {
        return Err(ApiError::ValidationError("per_page must be greater than 0".to_string()));
    }
    if per_page > max_per_page {
        return Err(ApiError::ValidationError(format!(
            "per_page cannot exceed {}",
            max_per_page
        )));
    }
    Ok(())
}

/// Validate UUID format
pub fn validate_uuid(value: &str) -> ApiResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value).map_err(|_| ApiError::ValidationError(format!("Invalid UUID: {}", value)))
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .unwrap_or_else(|_| unreachable!("email pattern is a valid regex"))
    })
}

/// Validate an email address shape
pub fn validate_email(value: &str, field_name: &str) -> ApiResult<()> {
    if value.len() > 254 || !email_regex().is_match(value) {
        return Err(ApiError::ValidationError(format!(
            "{} must be a valid email address",
            field_name
        )));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn validate_date(value: &str, field_name: &str) -> ApiResult<NaiveDate> {
    if value.len() != 10 {
        return Err(ApiError::ValidationError(format!("{} must be a YYYY-MM-DD date", field_name)));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::ValidationError(format!("{} must be a YYYY-MM-DD date", field_name)))
}

/// Validate an `HH:MM` time of day
pub fn validate_slot(value: &str, field_name: &str) -> ApiResult<()> {
    parse_slot(value)
        .map(|_| ())
        .map_err(|_| ApiError::ValidationError(format!("{} must be an HH:MM time", field_name)))
}

/// Validate an optional inclusive `from`/`to` date filter
pub fn validate_date_window(from: Option<&str>, to: Option<&str>) -> ApiResult<DateWindow> {
    let from_date = from.map(|v| validate_date(v, "from")).transpose()?;
    let to_date = to.map(|v| validate_date(v, "to")).transpose()?;

    if let (Some(f), Some(t)) = (from_date, to_date) {
        if f > t {
            return Err(ApiError::ValidationError("from cannot be after to".to_string()));
        }
    }

    Ok(DateWindow {
        from: from.map(str::to_string),
        to: to.map(str::to_string),
    })
}

/// Validate that a value is one of a fixed set
pub fn validate_one_of(value: &str, field_name: &str, allowed: &[&str]) -> ApiResult<()> {
    if !allowed.contains(&value) {
        return Err(ApiError::ValidationError(format!(
            "{} must be one of: {}",
            field_name,
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Validate a measured temperature
pub fn validate_temperature(value: f64, field_name: &str) -> ApiResult<()> {
    let (min, max) = TEMPERATURE_LIMITS;
    if !value.is_finite() || value < min || value > max {
        return Err(ApiError::ValidationError(format!(
            "{} must be between {} and {} degrees",
            field_name, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hello", "name").is_ok());
        assert!(validate_not_empty("", "name").is_err());
        assert!(validate_not_empty("   ", "name").is_err());
    }

    #[test]
    fn test_validate_string_length() {
        assert!(validate_string_length("hello", "name", 1, 10).is_ok());
        assert!(validate_string_length("hi", "name", 5, 10).is_err());
        assert!(validate_string_length("very long string", "name", 1, 5).is_err());
        // Cyrillic counts characters, not bytes
        assert!(validate_string_length("Хладилник", "name", 1, 9).is_ok());
    }

    #[test]
    fn test_validate_pagination() {
        assert!(validate_pagination(0, 10, 100).is_ok());
        assert!(validate_pagination(0, 0, 100).is_err());
        assert!(validate_pagination(0, 150, 100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("invalid-uuid").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("owner@example.bg", "email").is_ok());
        assert!(validate_email("first.last+haccp@mail.example.com", "email").is_ok());
        assert!(validate_email("owner@", "email").is_err());
        assert!(validate_email("owner.example.bg", "email").is_err());
        assert!(validate_email("owner@example", "email").is_err());
        assert!(validate_email("", "email").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2024-02-29", "date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(validate_date("2023-02-29", "date").is_err());
        assert!(validate_date("2024-2-9", "date").is_err());
        assert!(validate_date("29.02.2024", "date").is_err());
    }

    #[test]
    fn test_validate_slot() {
        assert!(validate_slot("10:00", "time").is_ok());
        assert!(validate_slot("23:59", "time").is_ok());
        assert!(validate_slot("24:00", "time").is_err());
        assert!(validate_slot("9:00", "time").is_err());
    }

    #[test]
    fn test_validate_date_window() {
        let window = validate_date_window(Some("2024-03-01"), Some("2024-03-15")).unwrap();
        assert_eq!(window.from.as_deref(), Some("2024-03-01"));
        assert_eq!(window.to.as_deref(), Some("2024-03-15"));

        assert_eq!(validate_date_window(None, None).unwrap(), DateWindow::default());
        assert!(validate_date_window(Some("2024-03-15"), Some("2024-03-01")).is_err());
        assert!(validate_date_window(Some("yesterday"), None).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("kg", "unit", &["kg", "g"]).is_ok());
        assert!(validate_one_of("lb", "unit", &["kg", "g"]).is_err());
    }

    #[test]
    fn test_validate_temperature() {
        assert!(validate_temperature(3.5, "temperature").is_ok());
        assert!(validate_temperature(-18.0, "temperature").is_ok());
        assert!(validate_temperature(f64::NAN, "temperature").is_err());
        assert!(validate_temperature(500.0, "temperature").is_err());
    }
}
