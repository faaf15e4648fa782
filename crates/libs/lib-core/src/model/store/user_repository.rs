//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, run_migrations, UserForCreate, UserRepository};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite:data/salesbot.db").await?;
//! run_migrations(&pool).await?;
//!
//! let user = UserRepository::create(
//!     &pool,
//!     UserForCreate::new("79991234567".to_string(), "argon2-hash".to_string()),
//! ).await?;
//!
//! let found = UserRepository::find_by_phone(&pool, "79991234567").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::DbPool;
use sqlx::query_as;

/// User repository for database operations.
///
/// All methods are async and return `sqlx::Error` on failure; callers convert
/// into `AppError` with `?`.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by normalized phone number.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching phone
    /// * `Ok(None)` - No user registered with that phone
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_phone(pool: &DbPool, phone: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE phone = ?")
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user in the database.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The newly created user with generated ID and timestamps
    /// * `Err(sqlx::Error)` - Database error (e.g., UNIQUE violation for a duplicate phone)
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (phone, password_hash) VALUES (?, ?)")
            .bind(&user_data.phone)
            .bind(&user_data.password_hash)
            .execute(pool)
            .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update the last login timestamp for a user.
    ///
    /// # Note
    ///
    /// This method does not verify that the user exists. If the user ID is invalid,
    /// it will succeed but not update any rows.
    pub async fn update_last_login(pool: &DbPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET last_login = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Activate or deactivate an account.
    pub async fn set_active(pool: &DbPool, id: i64, is_active: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET is_active = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Count registered users.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Delete all users from the database.
    ///
    /// **Warning**: This permanently deletes all user records. Use with caution.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of users deleted
    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
