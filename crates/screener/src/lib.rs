//! # Meridian Screener
//!
//! The filter/sort pipeline behind the company list. It is a pure function of
//! its inputs: a predicate filter followed by a stable comparator sort, recomputed
//! from scratch on every call. Records are borrowed, never copied or mutated.

pub mod filter;
pub mod sort;

pub use filter::{ALL, Choice, FilterConfig};
pub use sort::{SortKey, sort_records};

use core_types::CompanyRecord;
use serde::{Deserialize, Serialize};

/// A filter configuration paired with a sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screener {
    pub filter: FilterConfig,
    pub sort: SortKey,
}

impl Screener {
    pub fn new(filter: FilterConfig, sort: SortKey) -> Self {
        Self { filter, sort }
    }

    /// Filters, then sorts, returning the derived sequence to render.
    pub fn run<'a>(&self, records: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
        // 1. Filter
        let mut selected = self.filter.apply(records);

        // 2. Sort
        sort_records(&mut selected, self.sort);

        tracing::debug!(
            total = records.len(),
            selected = selected.len(),
            sort = %self.sort,
            "Screened company list."
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::RiskLevel;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const NAMES: [&str; 6] = ["Acme", "beta", "Crane", "Delta Labs", "acme two", "Echo"];
    const SECTORS: [&str; 3] = ["SaaS", "FinTech", "IoT"];
    const STAGES: [&str; 3] = ["Series A", "Series B", "Growth"];

    fn arb_risk() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High)
        ]
    }

    fn arb_records() -> impl Strategy<Value = Vec<CompanyRecord>> {
        prop::collection::vec(
            (0..NAMES.len(), 0..SECTORS.len(), 0..STAGES.len(), arb_risk(), 0i64..1_000, -50i64..100, 0i64..36),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, sector, stage, risk, arr, growth, runway))| {
                    CompanyRecord::new(i.to_string(), NAMES[name])
                        .with_sector(SECTORS[sector])
                        .with_stage(STAGES[stage])
                        .with_risk(risk)
                        .with_arr(Decimal::from(arr))
                        .with_growth(Decimal::from(growth))
                        .with_runway(Decimal::from(runway))
                })
                .collect()
        })
    }

    fn arb_filter() -> impl Strategy<Value = FilterConfig> {
        (
            prop::option::of(prop_oneof![Just(""), Just("a"), Just("ACME"), Just("ta")]),
            prop::option::of(0..SECTORS.len()),
            prop::option::of(0..STAGES.len()),
            prop::option::of(arb_risk()),
        )
            .prop_map(|(search, sector, stage, risk)| FilterConfig {
                search_term: search.map(str::to_string),
                sector: sector.map_or(Choice::All, |i| Choice::Only(SECTORS[i].to_string())),
                stage: stage.map_or(Choice::All, |i| Choice::Only(STAGES[i].to_string())),
                risk_level: risk.map_or(Choice::All, Choice::Only),
            })
    }

    fn arb_sort_key() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn filtered_output_is_an_ordered_subset(records in arb_records(), filter in arb_filter()) {
            let filtered = filter.apply(&records);

            // Every kept record satisfies the predicate.
            prop_assert!(filtered.iter().all(|r| filter.matches(r)));

            // Kept records appear in input order and nothing matching was dropped.
            let expected: Vec<&str> = records
                .iter()
                .filter(|r| filter.matches(r))
                .map(|r| r.id.as_str())
                .collect();
            let actual: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn sorting_a_sorted_sequence_is_a_fixed_point(records in arb_records(), key in arb_sort_key()) {
            let mut once: Vec<&CompanyRecord> = records.iter().collect();
            sort_records(&mut once, key);
            let mut twice = once.clone();
            sort_records(&mut twice, key);

            let once_ids: Vec<&str> = once.iter().map(|r| r.id.as_str()).collect();
            let twice_ids: Vec<&str> = twice.iter().map(|r| r.id.as_str()).collect();
            prop_assert_eq!(once_ids, twice_ids);
        }
    }

    #[test]
    fn run_filters_before_sorting() {
        let records = vec![
            CompanyRecord::new("1", "Acme")
                .with_arr(dec!(100))
                .with_risk(RiskLevel::Low),
            CompanyRecord::new("2", "Beta")
                .with_arr(dec!(50))
                .with_risk(RiskLevel::High),
            CompanyRecord::new("3", "Gamma")
                .with_arr(dec!(500))
                .with_risk(RiskLevel::High),
        ];

        let all = Screener::new(FilterConfig::new(), SortKey::Arr).run(&records);
        let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Acme", "Beta"]);

        let high = Screener::new(FilterConfig::new().risk(RiskLevel::High), SortKey::Name).run(&records);
        let names: Vec<&str> = high.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Gamma"]);
    }
}
