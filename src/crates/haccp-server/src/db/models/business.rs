//! Business model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered company, identified by its EIK
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Business {
    pub id: String,

    /// Owning user
    pub user_id: String,

    pub name: String,

    /// Validated 9- or 13-digit EIK
    pub eik: String,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}
