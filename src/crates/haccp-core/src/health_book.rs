//! Personnel health-book validity

use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days before expiry at which a health book is flagged
pub const DEFAULT_WARN_DAYS: i64 = 30;

/// Validity of a staff member's health book on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBookStatus {
    Valid,
    ExpiringSoon,
    Expired,
    Missing,
}

impl HealthBookStatus {
    /// Classify an expiry date relative to `today`
    ///
    /// A book expiring today is still valid for today and counts as expiring soon.
    pub fn evaluate(expiry: Option<NaiveDate>, today: NaiveDate, warn_days: i64) -> Self {
        match expiry {
            None => HealthBookStatus::Missing,
            Some(date) if date < today => HealthBookStatus::Expired,
            Some(date) if (date - today).num_days() <= warn_days => HealthBookStatus::ExpiringSoon,
            Some(_) => HealthBookStatus::Valid,
        }
    }

    /// Days until expiry (negative once expired)
    pub fn days_remaining(expiry: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
        expiry.map(|date| (date - today).num_days())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthBookStatus::Valid => "valid",
            HealthBookStatus::ExpiringSoon => "expiring_soon",
            HealthBookStatus::Expired => "expired",
            HealthBookStatus::Missing => "missing",
        }
    }

    /// Needs attention from the establishment manager
    pub fn needs_attention(&self) -> bool {
        !matches!(self, HealthBookStatus::Valid)
    }
}

impl fmt::Display for HealthBookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HealthBookStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(HealthBookStatus::Valid),
            "expiring_soon" => Ok(HealthBookStatus::ExpiringSoon),
            "expired" => Ok(HealthBookStatus::Expired),
            "missing" => Ok(HealthBookStatus::Missing),
            other => Err(CoreError::UnknownHealthBookStatus(other.to_string())),
        }
    }
}
