//! API middleware layer
//!
//! Provides middleware for request processing including CORS, logging, and validation.

pub mod cors;
pub mod logging;
pub mod validation;

pub use cors::cors_layer;
pub use logging::logging_layer;
pub use validation::{
    validate_date, validate_date_window, validate_email, validate_not_empty, validate_one_of,
    validate_pagination, validate_slot, validate_string_length, validate_temperature,
    validate_uuid,
};
