//! Error types for harmony

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarmonyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HarmonyError>;
