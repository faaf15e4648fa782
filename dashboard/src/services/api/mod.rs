//! # Backend API
//!
//! [`ApiClient`] plus one module of endpoint functions per backend area.

pub mod auth;
pub mod client;
pub mod dashboard;

pub use client::{ApiClient, DEFAULT_API_URL, REQUEST_ID_HEADER};
