//! User repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::User;
use crate::db::repositories::Page;
use chrono::Utc;

/// User repository for managing account rows
pub struct UserRepository;

impl UserRepository {
    /// Insert a new user
    pub async fn create(pool: &DatabasePool, user: &User) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, full_name, role, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.role)
        .bind(user.is_active)
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .fetch_one(pool)
        .await
    }

    /// Insert a self-registered user, ignoring `user.role`
    ///
    /// The row becomes `admin` when the table is empty and `user` otherwise.
    /// The check runs inside the INSERT so concurrent sign-ups on a fresh
    /// database cannot both become administrators.
    pub async fn create_registered(pool: &DatabasePool, user: &User) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, full_name, role, is_active, created_at, updated_at)
             SELECT ?, ?, ?, ?,
                    CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'user' ELSE 'admin' END,
                    ?, ?, ?
             RETURNING *",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_by_email(pool: &DatabasePool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users, newest first
    pub async fn list(pool: &DatabasePool, page: Page) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?")
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Update role and active flag
    pub async fn update_access(
        pool: &DatabasePool,
        id: &str,
        role: &str,
        is_active: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = ?, is_active = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(role)
        .bind(is_active)
        .bind(&now)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Count all users
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
