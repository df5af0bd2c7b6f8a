//! Configuration management for Roomlink
//!
//! Environment-based configuration with file loading, defaults, and
//! validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

mod error;

pub use error::ConfigError;

/// Main bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Link store configuration
    pub store: StoreConfig,

    /// Bridging capacity limits
    pub limits: LimitsConfig,

    /// Authorization request handling
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Link store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path for the link store
    pub db_path: PathBuf,
}

/// Bridging capacity limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of bridged links; negative means unlimited.
    ///
    /// Enforced as a soft cap: the check is a point-in-time count, so
    /// concurrent bridges may overshoot slightly.
    pub room_count_limit: i64,
}

/// Authorization request handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long a pending authorization request may wait for a response
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            limits: LimitsConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/links.db"),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            room_count_limit: -1,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(300),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables follow the pattern `ROOMLINK_<SECTION>_<KEY>`,
    /// e.g. `ROOMLINK_LIMITS_ROOM_COUNT_LIMIT=100`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(db_path) = env::var("ROOMLINK_STORE_DB_PATH") {
            config.store.db_path = PathBuf::from(db_path);
        }
        if let Ok(limit) = env::var("ROOMLINK_LIMITS_ROOM_COUNT_LIMIT") {
            config.limits.room_count_limit = limit
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid room count limit: {}", e)))?;
        }
        if let Ok(timeout_secs) = env::var("ROOMLINK_AUTH_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = timeout_secs
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid auth timeout: {}", e)))?;
            config.auth.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(level) = env::var("ROOMLINK_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("ROOMLINK_LOG_JSON") {
            config.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "store db_path must not be empty".to_string(),
            ));
        }

        if self.auth.request_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "auth request_timeout must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.limits.room_count_limit, -1);
        assert_eq!(config.auth.request_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_config_validation() {
        let mut config = BridgeConfig::default();
        config.auth.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config = BridgeConfig::default();
        config.store.db_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_validation() {
        let mut config = BridgeConfig::default();

        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_errors_map_to_io_and_parse() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("nope.toml");
        let err = BridgeConfig::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));

        let garbled = dir.path().join("garbled.toml");
        std::fs::write(&garbled, "not = [valid toml").unwrap();
        let err = BridgeConfig::from_file(&garbled).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roomlink.toml");

        let mut config = BridgeConfig::default();
        config.limits.room_count_limit = 100;
        config.save_to_file(&path).unwrap();

        let loaded = BridgeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.limits.room_count_limit, 100);
        assert_eq!(loaded.auth.request_timeout, config.auth.request_timeout);
    }
}
