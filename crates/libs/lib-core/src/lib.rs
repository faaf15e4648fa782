//! # Core Library
//!
//! Configuration, error type and SQLite store for the sales-robot backend.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, run_migrations, DbPool};
