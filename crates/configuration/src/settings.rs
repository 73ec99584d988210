use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub insights: InsightThresholds,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
    pub dashboard: DashboardSettings,
}

/// Thresholds behind the insight cards, the top performers list and the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// A company is a top performer when its ARR growth is strictly above this percentage.
    pub top_performer_growth_pct: Decimal,
    /// Maximum number of top performers reported.
    pub top_performers_limit: usize,
    /// A company joins the watchlist when its runway is at or below this many months
    /// (or when it is high risk).
    pub watchlist_runway_months: Decimal,
    /// Maximum number of watchlist entries reported.
    pub watchlist_limit: usize,
    /// Runway, in months, at or below which the "Cash Runway Alert" counts a company.
    pub low_runway_months: Decimal,
}

/// Parameters of the upload flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Fixed processing delay applied before the uploaded set replaces the current one.
    pub processing_delay_ms: u64,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are additionally written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// The reporting period shown in the dashboard header.
    pub quarter_label: String,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            top_performer_growth_pct: dec!(20),
            top_performers_limit: 3,
            watchlist_runway_months: dec!(3),
            watchlist_limit: 3,
            low_runway_months: dec!(6),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            processing_delay_ms: 2000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            quarter_label: "Q2 2024".to_string(),
        }
    }
}
