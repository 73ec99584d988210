use core_types::{CompanyRecord, RiskLevel};
use rust_decimal_macros::dec;

/// The reporting period of the built-in sample portfolio.
pub const SAMPLE_QUARTER: &str = "Q2 2024";

/// The built-in mock portfolio the dashboard starts with before any upload.
pub fn sample_portfolio() -> Vec<CompanyRecord> {
    vec![
        CompanyRecord::new("1", "AlphaTech")
            .with_sector("Healthcare")
            .with_stage("Series B")
            .with_partner("John Smith")
            .with_arr(dec!(33136312))
            .with_growth(dec!(45.2))
            .with_margin(dec!(80.4))
            .with_headcount(85, 12)
            .with_runway(dec!(11))
            .with_burn(dec!(3253882))
            .with_risk(RiskLevel::Low),
        CompanyRecord::new("2", "BrightLogix")
            .with_sector("FinTech")
            .with_stage("Series A")
            .with_partner("Jane Doe")
            .with_arr(dec!(9606675))
            .with_growth(dec!(-8.5))
            .with_margin(dec!(45.4))
            .with_headcount(42, -3)
            .with_runway(dec!(9))
            .with_burn(dec!(3095505))
            .with_risk(RiskLevel::Medium)
            .with_alert("ARR contracted for the second consecutive quarter"),
        CompanyRecord::new("3", "CortexAI")
            .with_sector("AI/ML")
            .with_stage("Series C")
            .with_partner("Michael Chen")
            .with_arr(dec!(52400000))
            .with_growth(dec!(68.3))
            .with_margin(dec!(72.1))
            .with_headcount(210, 35)
            .with_runway(dec!(24))
            .with_risk(RiskLevel::Low),
        CompanyRecord::new("4", "Dataweave")
            .with_sector("SaaS")
            .with_stage("Growth")
            .with_partner("Sarah Johnson")
            .with_arr(dec!(87250000))
            .with_growth(dec!(22.4))
            .with_margin(dec!(81.7))
            .with_headcount(340, 18)
            .with_runway(dec!(30))
            .with_risk(RiskLevel::Low),
        CompanyRecord::new("5", "EdgeSense")
            .with_sector("IoT")
            .with_stage("Series A")
            .with_partner("David Park")
            .with_arr(dec!(4120000))
            .with_growth(dec!(-15.2))
            .with_margin(dec!(38.6))
            .with_headcount(28, -6)
            .with_runway(dec!(2.5))
            .with_risk(RiskLevel::High)
            .with_alert("Cash runway below 3 months; bridge financing required"),
        CompanyRecord::new("6", "FluxHealth")
            .with_sector("Healthcare")
            .with_stage("Series A")
            .with_partner("Emily Rodriguez")
            .with_arr(dec!(6850000))
            .with_growth(dec!(12.8))
            .with_margin(dec!(62.3))
            .with_headcount(47, 4)
            .with_runway(dec!(5))
            .with_risk(RiskLevel::Medium),
        CompanyRecord::new("7", "GridPay")
            .with_sector("FinTech")
            .with_stage("Series B")
            .with_partner("John Smith")
            .with_arr(dec!(18900000))
            .with_growth(dec!(35.6))
            .with_margin(dec!(68.9))
            .with_headcount(96, 10)
            .with_runway(dec!(14))
            .with_risk(RiskLevel::Low),
        CompanyRecord::new("8", "HelixML")
            .with_sector("AI/ML")
            .with_stage("Series B")
            .with_partner("Michael Chen")
            .with_arr(dec!(12300000))
            .with_growth(dec!(52.1))
            .with_margin(dec!(58.4))
            .with_headcount(74, 22)
            .with_runway(dec!(4))
            .with_risk(RiskLevel::High)
            .with_alert("Burn rate increased 40% quarter over quarter"),
        CompanyRecord::new("9", "InsightLoop")
            .with_sector("SaaS")
            .with_stage("Series C")
            .with_partner("Sarah Johnson")
            .with_arr(dec!(28700000))
            .with_growth(dec!(8.2))
            .with_margin(dec!(76.5))
            .with_headcount(150, -10)
            .with_runway(dec!(18))
            .with_risk(RiskLevel::Medium),
        CompanyRecord::new("10", "Jetstream IoT")
            .with_sector("IoT")
            .with_stage("Growth")
            .with_partner("David Park")
            .with_arr(dec!(41600000))
            .with_growth(dec!(15.3))
            .with_margin(dec!(49.2))
            .with_headcount(260, 5)
            .with_runway(dec!(20))
            .with_risk(RiskLevel::Low),
        CompanyRecord::new("11", "Kinetic Care")
            .with_sector("Healthcare")
            .with_stage("Series C")
            .with_partner("Emily Rodriguez")
            .with_arr(dec!(22100000))
            .with_growth(dec!(-3.4))
            .with_margin(dec!(65.8))
            .with_headcount(130, -12)
            .with_runway(dec!(7))
            .with_risk(RiskLevel::Medium),
        CompanyRecord::new("12", "Lumen Ledger")
            .with_sector("FinTech")
            .with_stage("Growth")
            .with_partner("Jane Doe")
            .with_arr(dec!(64800000))
            .with_growth(dec!(28.9))
            .with_margin(dec!(74.2))
            .with_headcount(285, 20)
            .with_runway(dec!(26))
            .with_risk(RiskLevel::Low),
    ]
    .into_iter()
    .map(|record| record.with_quarter(SAMPLE_QUARTER))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::validate_records;

    #[test]
    fn sample_portfolio_satisfies_store_invariants() {
        let records = sample_portfolio();
        assert_eq!(records.len(), 12);
        assert!(validate_records(&records).is_ok());
        assert!(records.iter().all(|r| r.quarter == SAMPLE_QUARTER));
    }
}
