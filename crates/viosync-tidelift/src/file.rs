use std::path::{Path, PathBuf};

use tracing::info;
use viosync_types::{FlatRecord, ReportSource, SyncError, SyncResult};

use crate::parse_report;

/// A violations report saved as JSON on disk.
#[derive(Debug, Clone)]
pub struct FileReportSource {
    path: PathBuf,
}

impl FileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSource for FileReportSource {
    fn fetch_violations(&self) -> SyncResult<Vec<FlatRecord>> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| {
            SyncError::config(format!(
                "Failed to read report file {}: {e}",
                self.path.display()
            ))
        })?;
        let records = parse_report(&body, "report file")?;
        info!(
            path = %self.path.display(),
            violations = records.len(),
            "Loaded violations report"
        );
        Ok(records)
    }
}
