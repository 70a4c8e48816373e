//! # viosync-core
//!
//! The **primary library interface** for `viosync`.
//!
//! Wires a [`ReportSource`], the grouping engine, the fingerprint and an
//! [`IssueTracker`] into one run. Embedders depend on this crate and
//! `viosync-types`, and bring their own source and tracker.
//!
//! ## Example
//!
//! ```rust,no_run
//! use viosync_core::{sync_workflow, AdfRenderer};
//! use viosync_types::KeyFieldList;
//! # fn demo(
//! #     source: impl viosync_types::ReportSource,
//! #     tracker: impl viosync_types::IssueTracker,
//! # ) -> viosync_types::SyncResult<()> {
//! let key_fields = KeyFieldList::new(["package_name", "violation_type"])?;
//! let totals = sync_workflow(&source, &tracker, &AdfRenderer::default(), &key_fields, |o| {
//!     println!("{} {}", o.issue.reference(), o.action);
//! })?;
//! println!("{totals}");
//! # Ok(())
//! # }
//! ```

mod driver;

use serde::Serialize;
use tracing::info;

pub use driver::{ReconciliationDriver, UnitOutcome};
pub use viosync_render::{AdfRenderer, IssueBodyRenderer};
pub use viosync_types as types;

use viosync_fingerprint::fingerprint_unit;
use viosync_types::{
    Fingerprint, IssueTracker, KeyFieldList, ReconciliationTotals, ReportSource, SyncResult,
};

/// Runs the complete sync: Fetch -> Group -> Reconcile.
///
/// `on_outcome` sees every unit as soon as the tracker has accepted it.
/// The first failure aborts the run; writes already made stay made.
pub fn sync_workflow<S, T, R, F>(
    source: &S,
    tracker: &T,
    renderer: &R,
    key_fields: &KeyFieldList,
    on_outcome: F,
) -> SyncResult<ReconciliationTotals>
where
    S: ReportSource,
    T: IssueTracker,
    R: IssueBodyRenderer,
    F: FnMut(&UnitOutcome),
{
    let records = source.fetch_violations()?;
    let units = viosync_group::group_violations(records, key_fields)?;
    info!(units = units.len(), "Grouped violations");

    let totals = ReconciliationDriver::new(tracker, renderer).reconcile(&units, on_outcome)?;
    info!(
        processed = totals.processed,
        created = totals.created,
        updated = totals.updated,
        "Sync finished"
    );
    Ok(totals)
}

/// One grouped unit as `preview` reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub fingerprint: Fingerprint,
    pub key_path: Vec<String>,
    pub summary: String,
    pub violations: usize,
}

/// Fetch and group without touching any tracker.
pub fn preview_workflow<S, R>(
    source: &S,
    renderer: &R,
    key_fields: &KeyFieldList,
) -> SyncResult<Vec<PreviewEntry>>
where
    S: ReportSource,
    R: IssueBodyRenderer,
{
    let records = source.fetch_violations()?;
    let units = viosync_group::group_violations(records, key_fields)?;
    Ok(units
        .iter()
        .map(|unit| PreviewEntry {
            fingerprint: fingerprint_unit(unit),
            key_path: unit.key_path.components().to_vec(),
            summary: renderer.summary(unit),
            violations: unit.records.len(),
        })
        .collect())
}
