//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Notes |
//! |---|---|---|
//! | `DATABASE_URL` | `sqlite:data/salesbot.db` | SQLite connection URL |
//! | `JWT_SECRET` | required | at least 32 characters |
//! | `JWT_EXPIRATION_HOURS` | `24` | 1..=720 |
//! | `SMSRU_API_ID` | unset | unset or empty selects the log-only SMS sender |
//! | `BIND_ADDRESS` | `127.0.0.1:3001` | HTTP listen address |
//!
//! The validated [`Config`] is handed to the router state by value; handlers and
//! middleware extract it from there.

use lib_utils::envs::{self, get_env, get_env_or, get_env_parse};

/// Database used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/salesbot.db";

pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// After this period, users must re-authenticate.
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// sms.ru API id; `None` means codes are only written to the log
    pub smsru_api_id: Option<String>,

    /// Address the HTTP server binds to
    pub bind_address: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| e.to_string())?;

        let jwt_expiration_hours = match get_env_parse::<i64>("JWT_EXPIRATION_HOURS") {
            Ok(hours) => hours,
            Err(envs::Error::MissingEnv(_)) => DEFAULT_JWT_EXPIRATION_HOURS,
            Err(e) => return Err(e.to_string()),
        };

        let smsru_api_id = get_env("SMSRU_API_ID")
            .ok()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let bind_address = get_env_or("BIND_ADDRESS", "127.0.0.1:3001");

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            smsru_api_id,
            bind_address,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("BIND_ADDRESS is not a socket address: {}", self.bind_address));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
            jwt_expiration_hours: 24,
            smsru_api_id: None,
            bind_address: "127.0.0.1:3001".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = Config {
            jwt_secret: "too-short".to_string(),
            ..valid_config()
        };
        assert!(config.validate().unwrap_err().contains("JWT_SECRET"));
    }

    #[test]
    fn test_expiration_bounds() {
        for hours in [0, 721] {
            let config = Config {
                jwt_expiration_hours: hours,
                ..valid_config()
            };
            assert!(config.validate().is_err(), "hours {hours}");
        }
    }

    #[test]
    fn test_bad_bind_address_rejected() {
        let config = Config {
            bind_address: "localhost".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }
}
