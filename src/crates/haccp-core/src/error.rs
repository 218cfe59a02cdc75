//! Error types for domain rule violations

use thiserror::Error;

/// Errors raised by the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Temperature range bounds are unusable
    #[error("Invalid temperature range: {0}")]
    InvalidRange(String),

    /// Unknown equipment type name
    #[error("Unknown equipment type: {0}")]
    UnknownEquipmentType(String),

    /// Slot is not an `HH:MM` time of day
    #[error("Invalid time slot: {0}")]
    InvalidSlot(String),

    #[error("Unknown health book status: {0}")]
    UnknownHealthBookStatus(String),
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, CoreError>;
