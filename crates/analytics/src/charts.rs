use crate::engine::{average_gross_margin, risk_counts, round_half_up, saturating_mul, saturating_sum};
use crate::palette::{risk_color, sector_color, series_color};
use core_types::{CompanyRecord, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Quarter labels of the projected trend series, oldest first.
pub const TREND_QUARTERS: [&str; 5] = ["Q2 2023", "Q3 2023", "Q4 2023", "Q1 2024", "Q2 2024"];

/// Number of bars in the "top by growth" and "top by margin" charts.
pub const LEADERBOARD_SIZE: usize = 6;

/// One slice of a pie/bar distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub name: String,
    pub value: usize,
    pub color: &'static str,
}

/// One quarter of the projected portfolio trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub quarter: &'static str,
    pub total_arr: Decimal,
    pub avg_margin: Decimal,
    pub total_headcount: Decimal,
}

/// A named value for leaderboard-style bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub name: String,
    pub sector: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnPoint {
    pub name: String,
    /// Monthly burn; `None` when it is not reported and cannot be derived.
    pub burn_rate: Option<Decimal>,
    pub runway: Decimal,
    pub risk: RiskLevel,
    pub arr: Decimal,
    pub growth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayBar {
    /// First word of the company name.
    pub name: String,
    pub runway: Decimal,
    pub risk: RiskLevel,
    pub color: &'static str,
}

/// The data series behind every analytics chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub trend: Vec<TrendPoint>,
    pub risk_distribution: Vec<DistributionEntry>,
    pub sector_distribution: Vec<DistributionEntry>,
    pub stage_distribution: Vec<DistributionEntry>,
    pub top_growth: Vec<MetricPoint>,
    pub top_margin: Vec<MetricPoint>,
    pub negative_growth: Vec<MetricPoint>,
    pub burn_vs_runway: Vec<BurnPoint>,
    pub runway_distribution: Vec<RunwayBar>,
}

impl AnalyticsReport {
    pub fn build(records: &[CompanyRecord]) -> Self {
        Self {
            trend: trend_projection(records),
            risk_distribution: risk_distribution(records),
            sector_distribution: sector_distribution(records),
            stage_distribution: stage_distribution(records),
            top_growth: top_by(records, LEADERBOARD_SIZE, |r| r.arr_growth),
            top_margin: top_by(records, LEADERBOARD_SIZE, |r| r.gross_margin),
            negative_growth: negative_growth(records),
            burn_vs_runway: burn_vs_runway(records),
            runway_distribution: runway_distribution(records),
        }
    }
}

/// Projects the current set backwards over `TREND_QUARTERS`, scaling ARR by
/// 15 % and headcount by 10 % per quarter and nudging the margin by 2 points.
pub fn trend_projection(records: &[CompanyRecord]) -> Vec<TrendPoint> {
    let avg_margin = average_gross_margin(records);

    TREND_QUARTERS
        .into_iter()
        .enumerate()
        .map(|(index, quarter)| {
            let step = Decimal::from(index);
            let arr_factor = Decimal::ONE + step * dec!(0.15);
            let headcount_factor = Decimal::ONE + step * dec!(0.1);
            let margin_factor = dec!(0.95) + step * dec!(0.02);

            let total_arr = saturating_sum(records.iter().map(|r| saturating_mul(r.arr, arr_factor)));
            let total_headcount = saturating_sum(
                records
                    .iter()
                    .map(|r| saturating_mul(Decimal::from(r.headcount), headcount_factor)),
            );

            TrendPoint {
                quarter,
                total_arr: round_half_up(total_arr),
                avg_margin: round_half_up(saturating_mul(avg_margin, margin_factor)),
                total_headcount: round_half_up(total_headcount),
            }
        })
        .collect()
}

/// Always three entries, low to high, zero counts included.
pub fn risk_distribution(records: &[CompanyRecord]) -> Vec<DistributionEntry> {
    let counts = risk_counts(records);
    RiskLevel::ALL
        .iter()
        .map(|level| DistributionEntry {
            name: level.label().to_string(),
            value: counts.get(*level),
            color: risk_color(*level),
        })
        .collect()
}

pub fn sector_distribution(records: &[CompanyRecord]) -> Vec<DistributionEntry> {
    group_count(records.iter().map(|r| r.sector.as_str()))
        .into_iter()
        .map(|(name, value)| DistributionEntry {
            color: sector_color(name),
            name: name.to_string(),
            value,
        })
        .collect()
}

pub fn stage_distribution(records: &[CompanyRecord]) -> Vec<DistributionEntry> {
    group_count(records.iter().map(|r| r.stage.as_str()))
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| DistributionEntry {
            name: name.to_string(),
            value,
            color: series_color(index),
        })
        .collect()
}

/// Counts occurrences, keeping keys in order of first appearance.
fn group_count<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for key in keys {
        let found = groups.iter().position(|(k, _)| *k == key);
        match found {
            Some(i) => groups[i].1 += 1,
            None => groups.push((key, 1)),
        }
    }
    groups
}

/// The `limit` largest values of `metric`, descending. Ties keep input order.
pub fn top_by<F>(records: &[CompanyRecord], limit: usize, metric: F) -> Vec<MetricPoint>
where
    F: Fn(&CompanyRecord) -> Decimal,
{
    let mut ranked: Vec<&CompanyRecord> = records.iter().collect();
    ranked.sort_by(|a, b| metric(b).cmp(&metric(a)));
    ranked
        .into_iter()
        .take(limit)
        .map(|r| MetricPoint {
            name: r.name.clone(),
            sector: r.sector.clone(),
            value: metric(r),
        })
        .collect()
}

/// Shrinking companies, worst first.
pub fn negative_growth(records: &[CompanyRecord]) -> Vec<MetricPoint> {
    let mut shrinking: Vec<&CompanyRecord> = records
        .iter()
        .filter(|r| r.arr_growth < Decimal::ZERO)
        .collect();
    shrinking.sort_by(|a, b| a.arr_growth.cmp(&b.arr_growth));
    shrinking
        .into_iter()
        .map(|r| MetricPoint {
            name: r.name.clone(),
            sector: r.sector.clone(),
            value: r.arr_growth,
        })
        .collect()
}

/// Reported monthly burn, or ARR / 12 / runway when burn is missing.
pub fn burn_rate(record: &CompanyRecord) -> Option<Decimal> {
    match record.monthly_burn {
        Some(burn) => Some(burn),
        None if record.cash_runway > Decimal::ZERO => (record.arr / dec!(12))
            .checked_div(record.cash_runway)
            .map(round_half_up),
        None => None,
    }
}

pub fn burn_vs_runway(records: &[CompanyRecord]) -> Vec<BurnPoint> {
    records
        .iter()
        .map(|r| BurnPoint {
            name: r.name.clone(),
            burn_rate: burn_rate(r),
            runway: r.cash_runway,
            risk: r.risk_level,
            arr: r.arr,
            growth: r.arr_growth,
        })
        .collect()
}

/// Runway per company, shortest first.
pub fn runway_distribution(records: &[CompanyRecord]) -> Vec<RunwayBar> {
    let mut bars: Vec<RunwayBar> = records
        .iter()
        .map(|r| RunwayBar {
            name: r.name.split_whitespace().next().unwrap_or_default().to_string(),
            runway: r.cash_runway,
            risk: r.risk_level,
            color: risk_color(r.risk_level),
        })
        .collect();
    bars.sort_by(|a, b| a.runway.cmp(&b.runway));
    bars
}
