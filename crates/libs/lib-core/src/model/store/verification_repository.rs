//! # Verification Repository
//!
//! Storage for pending SMS codes. Requesting a new code replaces any previous
//! one for the same phone, so at most one code is valid at a time.

use super::models::PhoneVerification;
use super::DbPool;
use sqlx::query_as;

pub struct VerificationRepository;

impl VerificationRepository {
    /// Store `code` as the only pending code for `phone`.
    pub async fn replace_code(pool: &DbPool, phone: &str, code: &str) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM phone_verifications WHERE phone = ?")
            .bind(phone)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO phone_verifications (phone, code) VALUES (?, ?)")
            .bind(phone)
            .bind(code)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }

    /// Find a pending code matching both `phone` and `code`.
    pub async fn find_code(
        pool: &DbPool,
        phone: &str,
        code: &str,
    ) -> Result<Option<PhoneVerification>, sqlx::Error> {
        query_as::<_, PhoneVerification>(
            "SELECT * FROM phone_verifications WHERE phone = ? AND code = ?",
        )
        .bind(phone)
        .bind(code)
        .fetch_optional(pool)
        .await
    }

    /// Remove pending codes for `phone` once registration completes.
    pub async fn delete_for_phone(pool: &DbPool, phone: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM phone_verifications WHERE phone = ?")
            .bind(phone)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove every pending code.
    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM phone_verifications")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
