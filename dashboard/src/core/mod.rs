//! # Core Module
//!
//! Error type and the service ports shared by every flow.

pub mod error;
pub mod service;

pub use error::{ClientError, Result};
pub use service::{PersistedSession, RemoteGateway, SessionStore};
