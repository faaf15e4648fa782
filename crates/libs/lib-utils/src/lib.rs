//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse};
pub use time::{format_time, now_utc};
pub use validation::{
    validate_integration, validate_knowledge_text, validate_login_password,
    validate_max_concurrent_calls, validate_password, validate_phone, validate_sms_code,
    validate_time_of_day,
};
