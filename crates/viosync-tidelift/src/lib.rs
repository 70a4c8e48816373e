//! # viosync-tidelift
//!
//! **Tier 2 (Report Sources)**
//!
//! [`ReportSource`] implementations:
//! * [`TideliftClient`] fetches the all-projects violations report over HTTP.
//! * [`FileReportSource`] reads a report saved to disk.
//!
//! Both accept either `{"report": [...]}` or a bare array of violations.

mod client;
mod file;

use serde::Deserialize;
use viosync_types::{FlatRecord, SyncError, SyncResult};

pub use client::{SERVICE, TideliftClient};
pub use file::FileReportSource;

pub use viosync_types::ReportSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportBody {
    Wrapped { report: Vec<FlatRecord> },
    Bare(Vec<FlatRecord>),
}

/// Decode a report body into violation records.
///
/// `origin` names where the body came from in error messages.
pub fn parse_report(body: &str, origin: &'static str) -> SyncResult<Vec<FlatRecord>> {
    let parsed: ReportBody =
        serde_json::from_str(body).map_err(|e| SyncError::InvalidResponse {
            service: origin,
            message: format!("report is not a list of violation objects ({e})"),
        })?;
    Ok(match parsed {
        ReportBody::Wrapped { report } => report,
        ReportBody::Bare(report) => report,
    })
}
