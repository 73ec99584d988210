//! # Meridian Ingest
//!
//! Getting portfolio data into the dashboard: parsing the CSV spreadsheet,
//! rendering the downloadable template, and the async upload flow that
//! replaces the record store and announces the outcome on the event bus.
//!
//! Uploads are all-or-nothing. A file that fails the type check, fails to
//! parse or fails store validation leaves the current records in place.

pub mod error;
pub mod reader;
pub mod template;
pub mod upload;

pub use error::IngestError;
pub use reader::{check_file_type, derive_risk, load_file, parse_records, parse_str};
pub use template::{TEMPLATE_FILE_NAME, TEMPLATE_HEADER, render_template, write_template};
pub use upload::{UploadReceipt, Uploader};
