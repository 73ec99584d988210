//! # Meridian Store
//!
//! Holds the in-memory company record set. The set is created by a loading
//! step (the built-in sample portfolio or an upload) and replaced atomically;
//! records are never merged or edited in place.

pub mod error;
pub mod repository;
pub mod sample;

pub use error::StoreError;
pub use repository::{RecordStore, validate_records};
pub use sample::{SAMPLE_QUARTER, sample_portfolio};
