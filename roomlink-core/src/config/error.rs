//! Bridge configuration errors

use thiserror::Error;

/// Errors raised while loading or checking the bridge configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("Config file I/O failed: {0}")]
    Io(String),

    /// The file contents are not valid bridge config TOML
    #[error("Failed to parse bridge config: {0}")]
    Parse(String),

    /// The config could not be serialized back to TOML
    #[error("Failed to serialize bridge config: {0}")]
    Serialize(String),

    /// An environment override carried an unusable value
    #[error("Invalid bridge config value: {0}")]
    InvalidValue(String),

    /// The loaded config is self-inconsistent
    #[error("Bridge config validation failed: {0}")]
    Validation(String),
}
