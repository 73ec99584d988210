use crate::error::ConfigError;
use rust_decimal::Decimal;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, DashboardSettings, InsightThresholds, LogFormat, LoggingSettings, UploadSettings,
};

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "meridian.toml";

/// Prefix of environment overrides, e.g. `MERIDIAN__UPLOAD__PROCESSING_DELAY_MS=0`.
pub const ENV_PREFIX: &str = "MERIDIAN";

/// Loads the application configuration.
///
/// Sources are layered: the built-in defaults, then the TOML file (the given
/// `path`, which must exist, or an optional `meridian.toml`), then environment
/// variables prefixed with `MERIDIAN__`. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Rejects settings that would make the insight engine meaningless.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let insights = &config.insights;
    let checks = [
        (
            insights.top_performers_limit == 0,
            "insights.top_performers_limit",
            "must be greater than 0",
        ),
        (
            insights.watchlist_limit == 0,
            "insights.watchlist_limit",
            "must be greater than 0",
        ),
        (
            insights.watchlist_runway_months < Decimal::ZERO,
            "insights.watchlist_runway_months",
            "cannot be negative",
        ),
        (
            insights.low_runway_months < Decimal::ZERO,
            "insights.low_runway_months",
            "cannot be negative",
        ),
        (
            config.logging.level.trim().is_empty(),
            "logging.level",
            "cannot be empty",
        ),
    ];

    match checks.into_iter().find(|(failed, _, _)| *failed) {
        Some((_, key, reason)) => Err(ConfigError::ValidationError { key, reason }),
        None => Ok(()),
    }
}
