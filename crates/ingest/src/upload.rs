use crate::error::IngestError;
use crate::reader::{check_file_type, parse_str};
use configuration::UploadSettings;
use core_types::CompanyRecord;
use events::{DashboardEvent, EventBus, Notice};
use std::path::Path;
use std::time::Duration;
use store::{RecordStore, validate_records};

pub const SUCCESS_TITLE: &str = "Data uploaded successfully";
pub const SUCCESS_DESCRIPTION: &str = "Portfolio data has been updated.";
pub const INVALID_TYPE_TITLE: &str = "Invalid file type";
pub const INVALID_TYPE_DESCRIPTION: &str = "Please select a CSV file.";
pub const FAILURE_TITLE: &str = "Upload failed";

/// Summary of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub file_name: String,
    pub record_count: usize,
}

/// Replaces the record store with the contents of an uploaded CSV file.
///
/// Every outcome is announced on the event bus as a `Notice`. The store is only
/// touched after the file has been read, parsed and validated and the
/// processing delay has elapsed; dropping the future before that leaves it as
/// it was.
#[derive(Debug, Clone)]
pub struct Uploader {
    settings: UploadSettings,
    events: EventBus,
}

impl Uploader {
    pub fn new(settings: UploadSettings, events: EventBus) -> Self {
        Self { settings, events }
    }

    pub async fn upload(&self, path: &Path, store: &mut RecordStore) -> Result<UploadReceipt, IngestError> {
        match self.process(path).await {
            Ok((file_name, records)) => {
                let record_count = records.len();
                if let Err(e) = store.replace_all(records) {
                    return Err(self.fail(e.into()));
                }

                self.events.notify(Notice::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION));
                self.events.publish(DashboardEvent::RecordsReplaced {
                    count: record_count,
                    source: file_name.clone(),
                });
                tracing::info!(file = %file_name, records = record_count, "Upload complete.");
                Ok(UploadReceipt { file_name, record_count })
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Everything up to, but not including, the replacement.
    async fn process(&self, path: &Path) -> Result<(String, Vec<CompanyRecord>), IngestError> {
        // 1. Only CSV files are accepted.
        check_file_type(path)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.events.publish(DashboardEvent::UploadStarted {
            file_name: file_name.clone(),
        });

        // 2. Read and parse.
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let records = parse_str(&text)?;
        validate_records(&records)?;

        // 3. Fixed processing delay.
        tokio::time::sleep(Duration::from_millis(self.settings.processing_delay_ms)).await;

        Ok((file_name, records))
    }

    fn fail(&self, error: IngestError) -> IngestError {
        let notice = match &error {
            IngestError::InvalidFileType(_) => Notice::error(INVALID_TYPE_TITLE, INVALID_TYPE_DESCRIPTION),
            other => Notice::error(FAILURE_TITLE, other.to_string()),
        };
        self.events.notify(notice);
        tracing::warn!(error = %error, "Upload failed.");
        error
    }
}
