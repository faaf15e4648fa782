//! # Logging
//!
//! File-based `tracing` output for the dashboard CLI. Logs go to
//! `logs/dashboard.log.<date>` so they never interleave with the prompts.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DASHBOARD_LOG_DIR`: log directory (default `logs`)
//! - `DASHBOARD_LOG_LEVEL`: filter directives (default `dashboard=info,warn`);
//!   `RUST_LOG` takes precedence when set

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
