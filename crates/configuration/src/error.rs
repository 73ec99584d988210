use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid setting '{key}': {reason}")]
    ValidationError { key: &'static str, reason: &'static str },
}
