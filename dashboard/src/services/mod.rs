//! # Services
//!
//! Implementations of the [`crate::core::service`] ports.
//!
//! - [`api`]: reqwest client for the backend HTTP API
//! - [`mock`]: in-process gateway for offline demos and tests
//! - [`storage`]: file and memory session stores

pub mod api;
pub mod mock;
pub mod storage;

pub use api::ApiClient;
pub use mock::MockGateway;
pub use storage::{FileSessionStore, MemorySessionStore};
