//! Reconciliation scenarios.

mod common;

use common::{Call, MemoryTracker, StaticReport, violation};
use viosync_core::{AdfRenderer, ReconciliationDriver, preview_workflow, sync_workflow};
use viosync_fingerprint::fingerprint_components;
use viosync_types::{ErrorKind, KeyFieldList, SyncAction, SyncError};

fn key_fields() -> KeyFieldList {
    KeyFieldList::new(["package_name", "violation_type"]).unwrap()
}

fn left_pad_report() -> StaticReport {
    StaticReport(vec![
        violation("left-pad", "license", "https://example.test/1"),
        violation("left-pad", "license", "https://example.test/2"),
    ])
}

#[test]
fn given_empty_tracker_when_synced_then_one_issue_is_created_per_unit() {
    let tracker = MemoryTracker::new();
    let mut lines = Vec::new();

    let totals = sync_workflow(
        &left_pad_report(),
        &tracker,
        &AdfRenderer::default(),
        &key_fields(),
        |o| lines.push(format!("{} {}", o.issue.reference(), o.action)),
    )
    .unwrap();

    assert_eq!(totals.processed, 1);
    assert_eq!(totals.created, 1);
    assert_eq!(totals.updated, 0);
    assert_eq!(lines, vec!["SEC-10000 Created".to_string()]);

    let issues = tracker.issues.borrow();
    assert_eq!(issues[0].summary.as_deref(), Some("left-pad - license"));
    assert_eq!(
        issues[0].issue.fingerprint.as_deref(),
        Some(fingerprint_components(["left-pad", "license"]).as_str())
    );
}

#[test]
fn given_existing_issue_when_synced_then_update_is_called_and_create_is_not() {
    let tracker = MemoryTracker::new();
    tracker.seed("42", fingerprint_components(["left-pad", "license"]).as_str());

    let totals = sync_workflow(
        &left_pad_report(),
        &tracker,
        &AdfRenderer::default(),
        &key_fields(),
        |_| {},
    )
    .unwrap();

    assert_eq!(totals.updated, 1);
    assert_eq!(totals.created, 0);
    assert_eq!(tracker.creates(), 0);
    assert_eq!(tracker.calls.borrow()[1], Call::Update("42".to_string()));
    // Update refreshes the description but leaves the summary alone.
    let issues = tracker.issues.borrow();
    assert_eq!(issues[0].summary.as_deref(), Some("seeded"));
    assert_eq!(issues[0].description["type"], "doc");
}

#[test]
fn given_empty_tracker_when_synced_twice_then_second_run_only_updates() {
    let tracker = MemoryTracker::new();
    let report = StaticReport(vec![
        violation("left-pad", "license", "a"),
        violation("left-pad", "vulnerability", "b"),
        violation("is-odd", "license", "c"),
        violation("left-pad", "license", "d"),
    ]);
    let renderer = AdfRenderer::default();

    let first = sync_workflow(&report, &tracker, &renderer, &key_fields(), |_| {}).unwrap();
    let second = sync_workflow(&report, &tracker, &renderer, &key_fields(), |_| {}).unwrap();

    assert_eq!(first.processed, 3);
    assert_eq!(first.created, 3);
    assert_eq!(second.processed, first.processed);
    assert_eq!(second.updated, 3);
    assert_eq!(second.created, 0);
    assert_eq!(tracker.issues.borrow().len(), 3);
}

#[test]
fn given_tracker_failure_when_synced_then_remaining_units_are_skipped() {
    // Calls: find(0), create(1), find(2) fails.
    let tracker = MemoryTracker::failing_on(2);
    let report = StaticReport(vec![
        violation("left-pad", "license", "a"),
        violation("is-odd", "license", "b"),
        violation("is-even", "license", "c"),
    ]);

    let err = sync_workflow(
        &report,
        &tracker,
        &AdfRenderer::default(),
        &key_fields(),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteService);
    assert_eq!(tracker.calls.borrow().len(), 3);
    // The create that already happened stays.
    assert_eq!(tracker.issues.borrow().len(), 1);
}

#[test]
fn given_create_failure_then_outcome_callback_is_not_invoked() {
    let tracker = MemoryTracker::failing_on(1);
    let mut seen = 0;
    let result = sync_workflow(
        &left_pad_report(),
        &tracker,
        &AdfRenderer::default(),
        &key_fields(),
        |_| seen += 1,
    );
    assert!(result.is_err());
    assert_eq!(seen, 0);
}

#[test]
fn given_record_missing_key_field_then_no_tracker_call_is_made() {
    let tracker = MemoryTracker::new();
    let mut fields = violation("left-pad", "license", "a").fields().clone();
    fields.remove("violation_type");
    let report = StaticReport(vec![violation("is-odd", "license", "b"), fields.into()]);

    let err = sync_workflow(
        &report,
        &tracker,
        &AdfRenderer::default(),
        &key_fields(),
        |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, SyncError::MissingField { .. }));
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(tracker.calls.borrow().is_empty());
}

#[test]
fn given_units_when_driven_directly_then_order_is_emission_order() {
    let tracker = MemoryTracker::new();
    let units = viosync_group::group_violations(
        vec![
            violation("b", "license", "1"),
            violation("a", "license", "2"),
        ],
        &key_fields(),
    )
    .unwrap();

    let driver = ReconciliationDriver::new(&tracker, AdfRenderer::default());
    let mut order = Vec::new();
    let totals = driver
        .reconcile(&units, |o| order.push(o.key_path.join("/")))
        .unwrap();

    assert_eq!(order, vec!["b/license", "a/license"]);
    assert_eq!(totals.created + totals.updated, totals.processed);
}

#[test]
fn given_report_when_previewed_then_fingerprints_and_counts_are_listed() {
    let report = StaticReport(vec![
        violation("left-pad", "license", "a"),
        violation("left-pad", "license", "b"),
        violation("left-pad", "vulnerability", "c"),
    ]);

    let preview = preview_workflow(&report, &AdfRenderer::default(), &key_fields()).unwrap();

    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0].summary, "left-pad - license");
    assert_eq!(preview[0].violations, 2);
    assert_eq!(preview[1].key_path, vec!["left-pad", "vulnerability"]);
    assert_ne!(preview[0].fingerprint, preview[1].fingerprint);
}

#[test]
fn outcome_reports_action_and_fingerprint() {
    let tracker = MemoryTracker::new();
    let unit = viosync_group::group_violations(
        vec![violation("left-pad", "license", "a")],
        &key_fields(),
    )
    .unwrap()
    .remove(0);

    let driver = ReconciliationDriver::new(&tracker, AdfRenderer::default());
    let first = driver.reconcile_unit(&unit).unwrap();
    let second = driver.reconcile_unit(&unit).unwrap();

    assert_eq!(first.action, SyncAction::Created);
    assert_eq!(second.action, SyncAction::Updated);
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.issue.id, second.issue.id);
}
