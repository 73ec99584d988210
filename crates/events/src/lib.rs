//! # Meridian Events
//!
//! This crate defines the events published while the dashboard runs: user-visible
//! notices and record-set replacement notifications, carried over a tokio
//! broadcast channel.
//!
//! It is a Layer 0 crate with no local dependencies.

// Declare the modules that make up this crate.
pub mod bus;
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use bus::{EventBus, run_listener};
pub use error::EventsError;
pub use messages::{DashboardEvent, Notice, NoticeLevel};
