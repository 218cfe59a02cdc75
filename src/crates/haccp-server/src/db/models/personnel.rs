//! Personnel model for database persistence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A staff member working at an establishment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Personnel {
    pub id: String,
    pub establishment_id: String,
    pub full_name: String,
    pub position: String,
    pub phone: Option<String>,

    /// Health book (personal health certificate) number
    pub health_book_number: Option<String>,

    /// Health book expiry date (YYYY-MM-DD)
    pub health_book_expiry: Option<String>,

    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Personnel {
    /// Parsed expiry date; unparseable values count as missing
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.health_book_expiry
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}
