use configuration::InsightThresholds;
use core_types::{CompanyRecord, RiskLevel};
use rust_decimal::Decimal;
use serde::Serialize;

/// Number of companies at each risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskCounts {
    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Portfolio-wide sums and averages.
///
/// Always computed over the record set passed in, never over a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub company_count: usize,
    pub total_arr: Decimal,
    pub total_headcount: u64,
    /// Mean gross margin rounded to a whole percent; 0 for an empty set.
    pub avg_gross_margin: Decimal,
}

impl PortfolioTotals {
    /// Creates zeroed totals, the value reported for an empty portfolio.
    pub fn new() -> Self {
        Self {
            company_count: 0,
            total_arr: Decimal::ZERO,
            total_headcount: 0,
            avg_gross_margin: Decimal::ZERO,
        }
    }
}

impl Default for PortfolioTotals {
    fn default() -> Self {
        Self::new()
    }
}

/// A company listed with the growth figure it is ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCompany {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub arr_growth: Decimal,
}

impl From<&CompanyRecord> for RankedCompany {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            sector: record.sector.clone(),
            arr_growth: record.arr_growth,
        }
    }
}

/// Why a company is on the watchlist. The runway condition takes precedence
/// when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WatchReason {
    LowRunway,
    HighRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub cash_runway: Decimal,
    pub reason: WatchReason,
    /// Short explanation, e.g. "2m runway" or "High risk".
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    Warning,
    Risk,
    Attention,
}

/// One of the headline insight cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub count: usize,
}

/// Everything the insights panel shows, derived from one record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub totals: PortfolioTotals,
    pub risk_counts: RiskCounts,
    pub low_runway_count: usize,
    pub negative_growth_count: usize,
    pub insights: Vec<InsightCard>,
    pub top_performers: Vec<RankedCompany>,
    pub watchlist: Vec<WatchlistEntry>,
    pub thresholds: InsightThresholds,
}
