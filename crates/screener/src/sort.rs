use core_types::CompanyRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The sort options offered by the company list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Alphabetical, ascending.
    #[default]
    Name,
    /// ARR, largest first.
    Arr,
    /// Cash runway, shortest first.
    Runway,
    /// Risk severity, most severe first.
    Risk,
    /// ARR growth, fastest first.
    Growth,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::Arr,
        SortKey::Runway,
        SortKey::Risk,
        SortKey::Growth,
    ];

    /// Resolves a key name. Unrecognized names fall back to `Name`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "arr" => SortKey::Arr,
            "runway" => SortKey::Runway,
            "risk" => SortKey::Risk,
            "growth" => SortKey::Growth,
            "name" => SortKey::Name,
            other => {
                tracing::debug!(key = other, "Unrecognized sort key, sorting by name.");
                SortKey::Name
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Arr => "arr",
            SortKey::Runway => "runway",
            SortKey::Risk => "risk",
            SortKey::Growth => "growth",
        }
    }

    /// The ordering this key imposes on two records.
    pub fn compare(&self, a: &CompanyRecord, b: &CompanyRecord) -> Ordering {
        match self {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Arr => b.arr.cmp(&a.arr),
            SortKey::Runway => a.cash_runway.cmp(&b.cash_runway),
            SortKey::Risk => b.risk_level.severity().cmp(&a.risk_level.severity()),
            SortKey::Growth => b.arr_growth.cmp(&a.arr_growth),
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::from_name(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-folded comparison, falling back to the raw strings so that names
/// differing only in case still have a deterministic order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts in place. The sort is stable: records with equal keys keep their
/// relative order.
pub fn sort_records(records: &mut [&CompanyRecord], key: SortKey) {
    records.sort_by(|a, b| key.compare(a, b));
}
