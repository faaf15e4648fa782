//! # Services Layer
//!
//! Business logic behind the HTTP handlers:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repository/Database/External APIs
//! ```
//!
//! ## Module Organization
//!
//! - [`sms`] - Verification code generation and delivery (sms.ru or log-only)
//! - [`knowledge`] - Turning free text into knowledge-base entries
//! - [`calls`] - Synthetic demo calls
//! - [`billing`] - Tariff lookup and mocked payment intents
//!
//! ## Error Handling
//!
//! Fallible services return `Result<T, AppError>`, so handlers can propagate with `?`.

pub mod billing;
pub mod calls;
pub mod knowledge;
pub mod sms;

pub use sms::{generate_code, LogSmsSender, SmsRuSender, SmsSender};
