//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the dashboard client and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Registration, login and user DTOs
//!   - **[`dto::dashboard`]**: Knowledge base, integrations, call settings, tariffs
//! - **[`utils`]**: Shared display and parsing helpers
//!   - **[`utils::format_phone`]**: Render `79991234567` as `+7 (999) 123-45-67`
//!   - **[`utils::parse_phone_list`]**: Extract valid numbers from pasted text
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case** in Rust, which maps to **snake_case** in JSON by default
//! - Optional fields are omitted from JSON when `None` (using `#[serde(skip_serializing_if = "Option::is_none")]`)
//! - All structs implement both `Serialize` and `Deserialize` for bidirectional communication
//!
//! ## Usage in Backend
//!
//! ```rust,ignore
//! use shared::dto::auth::{LoginRequest, AuthResponse};
//! use axum::Json;
//!
//! async fn login(Json(request): Json<LoginRequest>) -> Json<AuthResponse> {
//!     // Request is automatically deserialized from JSON
//!     // Response is automatically serialized to JSON
//!     # todo!()
//! }
//! ```
//!
//! ## Usage in the Dashboard Client
//!
//! ```rust,ignore
//! use shared::dto::auth::{RequestCodeRequest, OkResponse};
//!
//! let request = RequestCodeRequest { phone: "79991234567".to_string() };
//!
//! let response: OkResponse = reqwest::Client::new()
//!     .post("http://localhost:3001/register/request_code")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
