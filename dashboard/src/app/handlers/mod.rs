//! # Event Handlers
//!
//! User actions on [`crate::app::App`], grouped by screen.

pub mod auth;
pub mod dashboard;
pub mod payment;

pub use dashboard::IntegrationDraft;
