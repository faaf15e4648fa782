//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the dashboard client and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - SMS registration, login and user record DTOs
//! - [`dashboard`] - Onboarding tabs: knowledge base, integrations, call settings, tariffs
//!
//! ## Serialization Format
//!
//! All DTOs use `serde_json` for JSON serialization:
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /login
//! Content-Type: application/json
//!
//! {
//!   "phone": "79991234567",
//!   "password": "Passw0rd"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "user": {
//!     "id": "1",
//!     "phone": "79991234567",
//!     "balance": 0,
//!     "is_active": true,
//!     "created_at": "2024-01-01 00:00:00 UTC"
//!   },
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "message": "Login successful"
//! }
//! ```

pub mod auth;
pub mod dashboard;

pub use auth::*;
pub use dashboard::*;
