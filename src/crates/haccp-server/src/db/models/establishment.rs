//! Establishment model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A site (restaurant, bakery, shop...) operated by a business
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Establishment {
    pub id: String,

    /// Parent business
    pub business_id: String,

    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,

    /// restaurant, cafe, bar, bakery, canteen, catering, shop, other
    pub establishment_type: String,

    /// Food-safety authority registration number
    pub registration_number: Option<String>,

    /// Seating capacity, never negative
    pub seats: Option<i64>,

    pub created_at: String,
    pub updated_at: String,
}
