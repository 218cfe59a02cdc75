//! User model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account that owns businesses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (UUID string)
    pub id: String,

    /// Login email, lower case and unique
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,

    /// Role: user, admin
    pub role: String,

    pub is_active: bool,

    /// Creation timestamp (RFC 3339 string)
    pub created_at: String,

    /// Last update timestamp (RFC 3339 string)
    pub updated_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
