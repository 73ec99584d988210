//! Constant colour tables for chart series.

use core_types::RiskLevel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const PRIMARY: &str = "#8B5CF6";
pub const SECONDARY: &str = "#06B6D4";
pub const ACCENT: &str = "#F59E0B";
pub const SUCCESS: &str = "#10B981";
pub const DANGER: &str = "#EF4444";
pub const WARNING: &str = "#F59E0B";
pub const INFO: &str = "#3B82F6";
pub const PURPLE: &str = "#A855F7";
pub const PINK: &str = "#EC4899";
pub const INDIGO: &str = "#6366F1";

/// The full palette in cycling order, used for series without a fixed mapping.
pub const SERIES: [&str; 10] = [
    PRIMARY, SECONDARY, ACCENT, SUCCESS, DANGER, WARNING, INFO, PURPLE, PINK, INDIGO,
];

pub fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => SUCCESS,
        RiskLevel::Medium => WARNING,
        RiskLevel::High => DANGER,
    }
}

/// Known sectors have a fixed colour; anything else is drawn in indigo.
pub fn sector_color(sector: &str) -> &'static str {
    match sector {
        "Healthcare" => PURPLE,
        "FinTech" => SECONDARY,
        "AI/ML" => ACCENT,
        "SaaS" => SUCCESS,
        "IoT" => INFO,
        _ => INDIGO,
    }
}

pub fn series_color(index: usize) -> &'static str {
    SERIES[index % SERIES.len()]
}

/// How alarming a cash runway is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunwayTone {
    /// Three months or less.
    Critical,
    /// Six months or less.
    Caution,
    Healthy,
}

impl RunwayTone {
    pub fn of(months: Decimal) -> Self {
        if months <= dec!(3) {
            RunwayTone::Critical
        } else if months <= dec!(6) {
            RunwayTone::Caution
        } else {
            RunwayTone::Healthy
        }
    }
}
