//! # Database Store
//!
//! Database connection pool, embedded migrations, and repository implementations.

// region: --- Modules
pub mod models;
pub mod user_repository;
pub mod verification_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use models::{PhoneVerification, User, UserForCreate};
pub use user_repository::UserRepository;
pub use verification_repository::VerificationRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations from the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../../migrations");

/// Create a new SQLite connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Apply pending schema migrations.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
// endregion: --- Types and Functions

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory database with the schema applied.
    ///
    /// A single connection keeps every query on the same in-memory database.
    pub async fn setup_test_db() -> DbPool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }
}
