//! Collaborator contracts the reconciliation pipeline is written against.

use crate::{FlatRecord, Fingerprint, IssuePayload, RemoteIssue, SyncResult};

/// Produces the flat violation list for one run.
pub trait ReportSource {
    fn fetch_violations(&self) -> SyncResult<Vec<FlatRecord>>;
}

/// The remote issue tracker, already bound to its unique fingerprint field.
///
/// Every call is a blocking round trip. Any error is fatal for the run.
pub trait IssueTracker {
    /// First issue whose fingerprint field matches `fingerprint`, if any.
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> SyncResult<Option<RemoteIssue>>;

    /// Create an issue carrying `fingerprint` in the unique field.
    fn create_issue(
        &self,
        payload: &IssuePayload,
        fingerprint: &Fingerprint,
    ) -> SyncResult<RemoteIssue>;

    /// Overwrite the fields present in `payload` on an existing issue.
    fn update_issue(&self, issue: &RemoteIssue, payload: &IssuePayload) -> SyncResult<()>;
}

impl<T: ReportSource + ?Sized> ReportSource for &T {
    fn fetch_violations(&self) -> SyncResult<Vec<FlatRecord>> {
        (**self).fetch_violations()
    }
}

impl<T: IssueTracker + ?Sized> IssueTracker for &T {
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> SyncResult<Option<RemoteIssue>> {
        (**self).find_by_fingerprint(fingerprint)
    }

    fn create_issue(
        &self,
        payload: &IssuePayload,
        fingerprint: &Fingerprint,
    ) -> SyncResult<RemoteIssue> {
        (**self).create_issue(payload, fingerprint)
    }

    fn update_issue(&self, issue: &RemoteIssue, payload: &IssuePayload) -> SyncResult<()> {
        (**self).update_issue(issue, payload)
    }
}
