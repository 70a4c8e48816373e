//! In-memory collaborators for reconciliation tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use serde_json::{Value, json};
use viosync_types::{
    Fingerprint, FlatRecord, IssuePayload, IssueTracker, RemoteIssue, ReportSource, SyncError,
    SyncResult,
};

/// A report that always returns the same records.
pub struct StaticReport(pub Vec<FlatRecord>);

impl ReportSource for StaticReport {
    fn fetch_violations(&self) -> SyncResult<Vec<FlatRecord>> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find(String),
    Create(String),
    Update(String),
}

/// Stored issue plus the last payload written to it.
#[derive(Debug, Clone)]
pub struct StoredIssue {
    pub issue: RemoteIssue,
    pub summary: Option<String>,
    pub description: Value,
}

/// Tracker double with substring fingerprint search and failure injection.
#[derive(Default)]
pub struct MemoryTracker {
    pub issues: RefCell<Vec<StoredIssue>>,
    pub calls: RefCell<Vec<Call>>,
    /// Fail the nth (0-based) call of any kind.
    pub fail_on_call: Cell<Option<usize>>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(call: usize) -> Self {
        let tracker = Self::default();
        tracker.fail_on_call.set(Some(call));
        tracker
    }

    pub fn seed(&self, id: &str, fingerprint: &str) {
        self.issues.borrow_mut().push(StoredIssue {
            issue: RemoteIssue {
                id: id.to_string(),
                key: Some(format!("SEC-{id}")),
                fingerprint: Some(fingerprint.to_string()),
            },
            summary: Some("seeded".to_string()),
            description: json!(null),
        });
    }

    pub fn creates(&self) -> usize {
        self.count(|c| matches!(c, Call::Create(_)))
    }

    pub fn updates(&self) -> usize {
        self.count(|c| matches!(c, Call::Update(_)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn log(&self, call: Call) -> SyncResult<()> {
        let n = self.calls.borrow().len();
        self.calls.borrow_mut().push(call);
        if self.fail_on_call.get() == Some(n) {
            return Err(SyncError::RemoteStatus {
                service: "Jira",
                status: 500,
            });
        }
        Ok(())
    }
}

impl IssueTracker for MemoryTracker {
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> SyncResult<Option<RemoteIssue>> {
        self.log(Call::Find(fingerprint.to_string()))?;
        Ok(self
            .issues
            .borrow()
            .iter()
            .find(|s| {
                s.issue
                    .fingerprint
                    .as_deref()
                    .is_some_and(|f| f.contains(fingerprint.as_str()))
            })
            .map(|s| s.issue.clone()))
    }

    fn create_issue(
        &self,
        payload: &IssuePayload,
        fingerprint: &Fingerprint,
    ) -> SyncResult<RemoteIssue> {
        self.log(Call::Create(fingerprint.to_string()))?;
        let id = (10_000 + self.issues.borrow().len()).to_string();
        let issue = RemoteIssue {
            key: Some(format!("SEC-{id}")),
            id,
            fingerprint: Some(fingerprint.to_string()),
        };
        self.issues.borrow_mut().push(StoredIssue {
            issue: issue.clone(),
            summary: payload.summary.clone(),
            description: payload.description.clone(),
        });
        Ok(issue)
    }

    fn update_issue(&self, issue: &RemoteIssue, payload: &IssuePayload) -> SyncResult<()> {
        self.log(Call::Update(issue.id.clone()))?;
        let mut issues = self.issues.borrow_mut();
        let stored = issues
            .iter_mut()
            .find(|s| s.issue.id == issue.id)
            .ok_or(SyncError::RemoteStatus {
                service: "Jira",
                status: 404,
            })?;
        stored.description = payload.description.clone();
        Ok(())
    }
}

pub fn violation(package: &str, kind: &str, link: &str) -> FlatRecord {
    [
        ("package_name", json!(package)),
        ("violation_type", json!(kind)),
        ("violation_description", json!(format!("{kind} issue in {package}"))),
        ("dependency_chain", json!(["app", package])),
        ("action", json!("upgrade")),
        ("violation_link", json!(link)),
    ]
    .into_iter()
    .collect()
}
