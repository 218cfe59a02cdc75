//! Equipment types and permitted temperature ranges

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Kind of cooling or heating equipment a diary tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Refrigerator,
    Freezer,
    ColdDisplay,
    HotDisplay,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 4] = [
        EquipmentType::Refrigerator,
        EquipmentType::Freezer,
        EquipmentType::ColdDisplay,
        EquipmentType::HotDisplay,
    ];

    /// Name used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Refrigerator => "refrigerator",
            EquipmentType::Freezer => "freezer",
            EquipmentType::ColdDisplay => "cold_display",
            EquipmentType::HotDisplay => "hot_display",
        }
    }

    /// Regulatory range in degrees Celsius
    pub fn default_range(&self) -> TemperatureRange {
        let (min, max) = match self {
            EquipmentType::Refrigerator => (0.0, 4.0),
            EquipmentType::Freezer => (-36.0, -18.0),
            EquipmentType::ColdDisplay => (0.0, 4.0),
            EquipmentType::HotDisplay => (63.0, 80.0),
        };
        TemperatureRange { min, max }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        EquipmentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEquipmentType(s.to_string()))
    }
}

// Slack for binary representations like 0.3 * 10 = 3.0000000000000004
const TENTHS_EPSILON: f64 = 1e-9;

/// Inclusive temperature interval in degrees Celsius
///
/// Always holds at least one value with a single decimal place, so a
/// generated reading can be drawn from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    min: f64,
    max: f64,
}

impl TemperatureRange {
    /// Build a range, rejecting non-finite bounds, `min > max` and intervals
    /// too narrow to contain a one-decimal value
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CoreError::InvalidRange(
                "bounds must be finite numbers".to_string(),
            ));
        }
        if min > max {
            return Err(CoreError::InvalidRange(format!(
                "min ({min}) is greater than max ({max})"
            )));
        }
        let range = Self { min, max };
        let (lo, hi) = range.tenths();
        if lo > hi {
            return Err(CoreError::InvalidRange(format!(
                "no one-decimal value between {min} and {max}"
            )));
        }
        Ok(range)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Lowest and highest one-decimal values inside the range, in tenths
    pub(crate) fn tenths(&self) -> (i64, i64) {
        let mut lo = (self.min * 10.0 - TENTHS_EPSILON).ceil() as i64;
        if (lo as f64) / 10.0 < self.min {
            lo += 1;
        }
        let mut hi = (self.max * 10.0 + TENTHS_EPSILON).floor() as i64;
        if (hi as f64) / 10.0 > self.max {
            hi -= 1;
        }
        (lo, hi)
    }
}
