//! Incoming goods control model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Inspection record for a delivery of goods
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IncomingControl {
    pub id: String,
    pub establishment_id: String,

    /// Delivery date (YYYY-MM-DD)
    pub received_on: String,

    pub supplier: String,
    pub product_name: String,
    pub batch_number: Option<String>,
    pub quantity: f64,

    /// kg, g, l, ml, pcs, box
    pub unit: String,

    /// Measured on arrival, if applicable
    pub temperature: Option<f64>,

    pub expiry_date: Option<String>,

    /// Invoice or delivery note number
    pub document_number: Option<String>,

    pub is_accepted: bool,
    pub checked_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
