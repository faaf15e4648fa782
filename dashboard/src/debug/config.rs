//! Logging configuration from environment variables

use lib_utils::get_env_or;
use std::path::PathBuf;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "dashboard=info,warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory for the daily-rotated log file
    pub log_dir: PathBuf,
    /// `EnvFilter` directives
    pub log_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("DASHBOARD_LOG_DIR", DEFAULT_LOG_DIR)),
            log_level: get_env_or("DASHBOARD_LOG_LEVEL", DEFAULT_LOG_LEVEL),
        }
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = LogConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_debug_level_detected() {
        let config = LogConfig {
            log_level: "dashboard=debug".to_string(),
            ..LogConfig::default()
        };
        assert!(config.is_debug_enabled());
    }
}
