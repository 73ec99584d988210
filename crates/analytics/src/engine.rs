use crate::report::{
    InsightCard, InsightKind, InsightReport, PortfolioTotals, RankedCompany, RiskCounts,
    WatchReason, WatchlistEntry,
};
use configuration::InsightThresholds;
use core_types::{CompanyRecord, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A stateless calculator for the insights panel.
///
/// Every figure is recomputed from the record set on each call; nothing is
/// cached between calls.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    thresholds: InsightThresholds,
}

impl InsightEngine {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// The main entry point: derives the whole insights panel from `records`.
    ///
    /// Totals are taken over exactly the records passed in, so callers pass the
    /// full set rather than a filtered view.
    pub fn calculate(&self, records: &[CompanyRecord]) -> InsightReport {
        let t = &self.thresholds;

        let risk_counts = risk_counts(records);
        let low_runway_count = count_low_runway(records, t.low_runway_months);
        let negative_growth_count = count_negative_growth(records);

        let insights = vec![
            InsightCard {
                kind: InsightKind::Warning,
                title: "Cash Runway Alert".to_string(),
                description: format!(
                    "{} companies have {} months or less of runway",
                    low_runway_count, t.low_runway_months
                ),
                count: low_runway_count,
            },
            InsightCard {
                kind: InsightKind::Risk,
                title: "Performance Risk".to_string(),
                description: format!(
                    "{} companies showing negative ARR growth",
                    negative_growth_count
                ),
                count: negative_growth_count,
            },
            InsightCard {
                kind: InsightKind::Attention,
                title: "Requires Attention".to_string(),
                description: format!("{} companies flagged as high risk", risk_counts.high),
                count: risk_counts.high,
            },
        ];

        let top_performers = top_performers(records, t.top_performer_growth_pct, t.top_performers_limit)
            .into_iter()
            .map(RankedCompany::from)
            .collect();

        let report = InsightReport {
            totals: portfolio_totals(records),
            risk_counts,
            low_runway_count,
            negative_growth_count,
            insights,
            top_performers,
            watchlist: watchlist(records, t.watchlist_runway_months, t.watchlist_limit),
            thresholds: t.clone(),
        };

        tracing::debug!(
            companies = records.len(),
            watchlist = report.watchlist.len(),
            top_performers = report.top_performers.len(),
            "Insights calculated."
        );
        report
    }
}

/// Counts records per risk level.
pub fn risk_counts(records: &[CompanyRecord]) -> RiskCounts {
    records.iter().fold(RiskCounts::default(), |mut counts, r| {
        match r.risk_level {
            RiskLevel::Low => counts.low += 1,
            RiskLevel::Medium => counts.medium += 1,
            RiskLevel::High => counts.high += 1,
        }
        counts
    })
}

/// Counts records whose runway is at or below `months`.
pub fn count_low_runway(records: &[CompanyRecord], months: Decimal) -> usize {
    records.iter().filter(|r| r.cash_runway <= months).count()
}

pub fn count_negative_growth(records: &[CompanyRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.arr_growth < Decimal::ZERO)
        .count()
}

/// Records growing strictly faster than `growth_pct`, fastest first, at most `limit`.
pub fn top_performers(
    records: &[CompanyRecord],
    growth_pct: Decimal,
    limit: usize,
) -> Vec<&CompanyRecord> {
    let mut performers: Vec<&CompanyRecord> = records
        .iter()
        .filter(|r| r.arr_growth > growth_pct)
        .collect();
    performers.sort_by(|a, b| b.arr_growth.cmp(&a.arr_growth));
    performers.truncate(limit);
    performers
}

/// High-risk records and records with `runway_months` or less of runway, in
/// input order, at most `limit`.
pub fn watchlist(
    records: &[CompanyRecord],
    runway_months: Decimal,
    limit: usize,
) -> Vec<WatchlistEntry> {
    records
        .iter()
        .filter(|r| r.risk_level == RiskLevel::High || r.cash_runway <= runway_months)
        .take(limit)
        .map(|r| {
            let (reason, detail) = if r.cash_runway <= runway_months {
                (WatchReason::LowRunway, format!("{}m runway", r.cash_runway.normalize()))
            } else {
                (WatchReason::HighRisk, "High risk".to_string())
            };
            WatchlistEntry {
                id: r.id.clone(),
                name: r.name.clone(),
                risk_level: r.risk_level,
                cash_runway: r.cash_runway,
                reason,
                detail,
            }
        })
        .collect()
}

/// Total ARR, total headcount and rounded mean gross margin over `records`.
pub fn portfolio_totals(records: &[CompanyRecord]) -> PortfolioTotals {
    if records.is_empty() {
        return PortfolioTotals::new();
    }

    let total_arr = saturating_sum(records.iter().map(|r| r.arr));
    let total_headcount: u64 = records.iter().map(|r| u64::from(r.headcount)).sum();

    PortfolioTotals {
        company_count: records.len(),
        total_arr,
        total_headcount,
        avg_gross_margin: round_half_up(average_gross_margin(records)),
    }
}

/// Unrounded mean gross margin; 0 for an empty set.
pub fn average_gross_margin(records: &[CompanyRecord]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }
    let sum = saturating_sum(records.iter().map(|r| r.gross_margin));
    sum / Decimal::from(records.len())
}

/// Rounds to the nearest integer, halves rounding up (towards positive infinity).
pub fn round_half_up(value: Decimal) -> Decimal {
    match value.checked_add(dec!(0.5)) {
        Some(shifted) => shifted.floor(),
        None => value.floor(),
    }
}

/// Adds, clamping at `Decimal::MAX` / `Decimal::MIN` instead of panicking.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Multiplies, clamping at `Decimal::MAX` / `Decimal::MIN` instead of panicking.
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(if a.is_sign_negative() != b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}
