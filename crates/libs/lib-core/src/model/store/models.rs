use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    /// Normalized 11-digit phone number
    pub phone: String,
    pub password_hash: String,
    pub is_active: bool,
    /// Whole rubles
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Data structure for creating a new user.
///
/// Password should be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub phone: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(phone: String, password_hash: String) -> Self {
        Self {
            phone,
            password_hash,
        }
    }
}

/// A pending SMS verification code.
#[derive(Debug, Clone, FromRow)]
pub struct PhoneVerification {
    pub id: i64,
    pub phone: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}
