//! # HTTP Request Handlers
//!
//! Axum handlers grouped by feature. Business logic lives in [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: SMS registration and login
//!   - `POST /register/request_code` - Text a verification code
//!   - `POST /register/verify_code` - Check a code
//!   - `POST /register` - Create the account, returns a bearer token
//!   - `POST /login` - Phone + password, returns a bearer token
//!   - `GET /api/profile` - Current user (bearer)
//!
//! - **[`dashboard`]**: Onboarding tabs
//!   - `POST /api/test-call` - Schedule a demo call
//!   - `POST /api/process-knowledge` - Parse text into knowledge entries
//!   - `GET /api/tariffs` - Tariff catalogue
//!   - `POST /api/payments/activate` - Mocked payment intent (bearer)
//!
//! ## Handler Architecture
//!
//! ```rust,ignore
//! async fn handler(
//!     State(db): State<DbPool>,              // Shared state
//!     Extension(claims): Extension<Claims>,  // Bearer auth
//!     Json(payload): Json<RequestBody>,      // Request body
//! ) -> Result<Json<Response>, AppError> {
//!     Ok(Json(response))
//! }
//! ```
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; `AppError` renders as
//! `{"error": "...", "code": "..."}` with the matching status code.

pub mod auth;
pub mod dashboard;
