use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate company id '{0}' in record set")]
    DuplicateId(String),

    #[error("Company with id '{0}' has an empty name")]
    EmptyName(String),
}
