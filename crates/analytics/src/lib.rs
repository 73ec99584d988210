//! # Meridian Analytics Engine
//!
//! This crate derives every summary figure the dashboard shows from a record set:
//! risk counts, runway and growth alerts, top performers, the watchlist,
//! portfolio totals and the data series behind the analytics charts.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on `core-types`
//!   and on `configuration` for its thresholds.
//! - **Stateless Calculation:** Every function takes a slice of records and
//!   recomputes its result from scratch. No figure can fail; an empty set yields
//!   zeroed averages rather than NaN.
//!
//! ## Public API
//!
//! - `InsightEngine` / `InsightReport`: the insights panel.
//! - `AnalyticsReport`: the chart series.
//! - `palette`: constant colour tables for risk levels, sectors and series.

// Declare the modules that constitute this crate.
pub mod charts;
pub mod engine;
pub mod palette;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use charts::{AnalyticsReport, DistributionEntry, TrendPoint};
pub use engine::{
    InsightEngine, count_low_runway, count_negative_growth, portfolio_totals, risk_counts,
    top_performers, watchlist,
};
pub use report::{
    InsightCard, InsightKind, InsightReport, PortfolioTotals, RankedCompany, RiskCounts,
    WatchReason, WatchlistEntry,
};
