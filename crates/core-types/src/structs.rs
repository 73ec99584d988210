use crate::enums::RiskLevel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single portfolio company as reported for one quarter.
///
/// Records are never edited field by field: a record set is created by a
/// loading step and replaced as a whole. Field names serialize in camelCase
/// (`arrGrowth`, `cashRunway`, ...) so JSON output matches the dashboard shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub stage: String,
    pub partner: String,
    /// Annual recurring revenue in currency units.
    pub arr: Decimal,
    /// Year-over-year ARR growth, in percent. May be negative.
    pub arr_growth: Decimal,
    /// Gross margin in percent, expected to lie in 0..=100.
    pub gross_margin: Decimal,
    pub headcount: u32,
    pub headcount_change: i32,
    /// Months of operation left at the current burn.
    pub cash_runway: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_burn: Option<Decimal>,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_alert: Option<String>,
    pub quarter: String,
}

impl CompanyRecord {
    /// Creates a record with zeroed metrics and a low risk level.
    /// Chain the `with_*` methods to fill in the rest.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sector: String::new(),
            stage: String::new(),
            partner: String::new(),
            arr: Decimal::ZERO,
            arr_growth: Decimal::ZERO,
            gross_margin: Decimal::ZERO,
            headcount: 0,
            headcount_change: 0,
            cash_runway: Decimal::ZERO,
            monthly_burn: None,
            risk_level: RiskLevel::Low,
            ai_alert: None,
            quarter: String::new(),
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = partner.into();
        self
    }

    pub fn with_arr(mut self, arr: Decimal) -> Self {
        self.arr = arr;
        self
    }

    pub fn with_growth(mut self, arr_growth: Decimal) -> Self {
        self.arr_growth = arr_growth;
        self
    }

    pub fn with_margin(mut self, gross_margin: Decimal) -> Self {
        self.gross_margin = gross_margin;
        self
    }

    pub fn with_headcount(mut self, headcount: u32, change: i32) -> Self {
        self.headcount = headcount;
        self.headcount_change = change;
        self
    }

    pub fn with_runway(mut self, months: Decimal) -> Self {
        self.cash_runway = months;
        self
    }

    pub fn with_burn(mut self, monthly_burn: Decimal) -> Self {
        self.monthly_burn = Some(monthly_burn);
        self
    }

    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.ai_alert = Some(alert.into());
        self
    }

    pub fn with_quarter(mut self, quarter: impl Into<String>) -> Self {
        self.quarter = quarter.into();
        self
    }

    /// Whether the record carries an AI alert that the UI should surface.
    pub fn has_alert(&self) -> bool {
        self.ai_alert.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn serializes_with_dashboard_field_names() {
        let record = CompanyRecord::new("1", "Acme")
            .with_growth(dec!(10))
            .with_runway(dec!(12));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["arrGrowth"], "10");
        assert_eq!(value["cashRunway"], "12");
        assert_eq!(value["riskLevel"], "low");
        assert!(value.get("aiAlert").is_none());
    }

    #[test]
    fn blank_alert_is_not_an_alert() {
        assert!(!CompanyRecord::new("1", "Acme").with_alert("  ").has_alert());
        assert!(CompanyRecord::new("1", "Acme").with_alert("Burn up 40%").has_alert());
    }
}
