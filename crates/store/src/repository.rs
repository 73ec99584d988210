use crate::error::StoreError;
use core_types::CompanyRecord;
use std::collections::HashSet;

/// The in-memory record set behind the dashboard.
///
/// The set is only ever replaced as a whole. `replace_all` validates the
/// incoming records first and swaps them in only when every check passes, so
/// a rejected set leaves the current one untouched.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<CompanyRecord>,
}

impl RecordStore {
    /// Creates a store from an initial record set.
    pub fn new(records: Vec<CompanyRecord>) -> Result<Self, StoreError> {
        validate_records(&records)?;
        Ok(Self { records })
    }

    /// Replaces the entire record set atomically.
    pub fn replace_all(&mut self, records: Vec<CompanyRecord>) -> Result<(), StoreError> {
        validate_records(&records)?;
        tracing::info!(
            previous = self.records.len(),
            current = records.len(),
            "Record set replaced."
        );
        self.records = records;
        Ok(())
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Checks the record-set invariants: unique ids and non-empty names.
pub fn validate_records(records: &[CompanyRecord]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.name.trim().is_empty() {
            return Err(StoreError::EmptyName(record.id.clone()));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}
