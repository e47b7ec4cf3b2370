//! Error types for YatraNav

use thiserror::Error;

/// YatraNav error type
#[derive(Error, Debug)]
pub enum YatraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hardware error: {0}")]
    Hardware(String),

    #[error("Malformed route: {0}")]
    Motion(String),

    #[error("Mission failed: {0}")]
    MissionFailed(String),
}

impl From<toml::de::Error> for YatraError {
    fn from(e: toml::de::Error) -> Self {
        YatraError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, YatraError>;
