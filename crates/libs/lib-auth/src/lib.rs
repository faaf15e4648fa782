//! # Authentication Library
//!
//! Password hashing and bearer-token (JWT) management for phone-based accounts.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{decode_jwt, encode_jwt, Claims};
