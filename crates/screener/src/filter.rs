use core_types::{CompanyRecord, CoreError, RiskLevel};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The text sentinel a select control uses for "no restriction".
pub const ALL: &str = "all";

/// A single select control: either unrestricted or pinned to one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl Choice<String> {
    /// Reads a free-text select value; blank or `all` (any case) means unrestricted.
    pub fn from_text(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }
}

impl FromStr for Choice<RiskLevel> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            Ok(Choice::All)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

/// The four conjunctive filter controls of the company list.
///
/// Every field defaults to "all", so an empty config keeps every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub search_term: Option<String>,
    pub sector: Choice<String>,
    pub stage: Choice<String>,
    pub risk_level: Choice<RiskLevel>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn sector(mut self, sector: &str) -> Self {
        self.sector = Choice::from_text(sector);
        self
    }

    pub fn stage(mut self, stage: &str) -> Self {
        self.stage = Choice::from_text(stage);
        self
    }

    pub fn risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Choice::Only(risk_level);
        self
    }

    /// Returns true iff the record passes the search and all three selects.
    pub fn matches(&self, record: &CompanyRecord) -> bool {
        let matches_search = match self.search_term.as_deref() {
            None | Some("") => true,
            Some(term) => record.name.to_lowercase().contains(&term.to_lowercase()),
        };

        matches_search
            && self.sector.matches(&record.sector)
            && self.stage.matches(&record.stage)
            && self.risk_level.matches(&record.risk_level)
    }

    /// Keeps the matching records, in their input order.
    pub fn apply<'a>(&self, records: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn acme_and_beta() -> Vec<CompanyRecord> {
        vec![
            CompanyRecord::new("1", "Acme")
                .with_sector("SaaS")
                .with_stage("Series A")
                .with_arr(dec!(100))
                .with_growth(dec!(10))
                .with_runway(dec!(12))
                .with_risk(RiskLevel::Low),
            CompanyRecord::new("2", "Beta")
                .with_sector("FinTech")
                .with_stage("Growth")
                .with_arr(dec!(50))
                .with_growth(dec!(-5))
                .with_runway(dec!(2))
                .with_risk(RiskLevel::High),
        ]
    }

    fn names(records: &[&CompanyRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn empty_config_keeps_everything() {
        let records = acme_and_beta();
        assert_eq!(FilterConfig::new().apply(&records).len(), 2);
    }

    #[test]
    fn risk_filter_selects_high_risk_only() {
        let records = acme_and_beta();
        let filtered = FilterConfig::new().risk(RiskLevel::High).apply(&records);
        assert_eq!(names(&filtered), vec!["Beta"]);
    }

    #[test]
    fn search_is_a_case_insensitive_substring() {
        let records = acme_and_beta();
        assert_eq!(names(&FilterConfig::new().search("CM").apply(&records)), vec!["Acme"]);
        assert_eq!(FilterConfig::new().search("").apply(&records).len(), 2);
        assert!(FilterConfig::new().search("zeta").apply(&records).is_empty());
    }

    #[test]
    fn conditions_are_conjunctive() {
        let records = acme_and_beta();
        let filtered = FilterConfig::new()
            .sector("FinTech")
            .risk(RiskLevel::Low)
            .apply(&records);
        assert!(filtered.is_empty());

        let filtered = FilterConfig::new().sector("FinTech").stage("Growth").apply(&records);
        assert_eq!(names(&filtered), vec!["Beta"]);
    }

    #[test]
    fn all_sentinel_is_unrestricted() {
        assert_eq!(Choice::from_text("All"), Choice::All);
        assert_eq!(Choice::from_text(" "), Choice::All);
        assert_eq!(Choice::from_text("IoT"), Choice::Only("IoT".to_string()));
        assert_eq!("ALL".parse::<Choice<RiskLevel>>().unwrap(), Choice::All);
        assert_eq!(
            "medium".parse::<Choice<RiskLevel>>().unwrap(),
            Choice::Only(RiskLevel::Medium)
        );
        assert!("extreme".parse::<Choice<RiskLevel>>().is_err());
    }

    #[test]
    fn sector_match_is_exact() {
        let records = acme_and_beta();
        assert!(FilterConfig::new().sector("saas").apply(&records).is_empty());
    }
}
