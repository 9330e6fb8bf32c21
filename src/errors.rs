// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalHubError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse fixture JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Malformed fixture: {0}")]
    Malformed(String),

    #[error("Fixture unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EvalHubError>;
