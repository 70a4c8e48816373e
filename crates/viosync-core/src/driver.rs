use tracing::{debug, info};
use viosync_fingerprint::fingerprint_unit;
use viosync_render::IssueBodyRenderer;
use viosync_types::{
    Fingerprint, GroupedUnit, IssueTracker, KeyPath, ReconciliationTotals, RemoteIssue,
    SyncAction, SyncResult,
};

/// What happened to one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOutcome {
    pub action: SyncAction,
    pub key_path: KeyPath,
    pub fingerprint: Fingerprint,
    pub issue: RemoteIssue,
}

/// Decides create vs update for each unit and counts the results.
///
/// Units are handled one at a time, in the order given.
#[derive(Debug, Clone)]
pub struct ReconciliationDriver<T, R> {
    tracker: T,
    renderer: R,
}

impl<T, R> ReconciliationDriver<T, R>
where
    T: IssueTracker,
    R: IssueBodyRenderer,
{
    pub fn new(tracker: T, renderer: R) -> Self {
        Self { tracker, renderer }
    }

    /// Look the unit up by fingerprint, then update the match or create.
    pub fn reconcile_unit(&self, unit: &GroupedUnit) -> SyncResult<UnitOutcome> {
        let fingerprint = fingerprint_unit(unit);
        debug!(fingerprint = %fingerprint, key_path = %unit.key_path.join(" / "), "Reconciling");

        let (action, issue) = match self.tracker.find_by_fingerprint(&fingerprint)? {
            Some(issue) => {
                let payload = self.renderer.update_payload(unit);
                self.tracker.update_issue(&issue, &payload)?;
                (SyncAction::Updated, issue)
            }
            None => {
                let payload = self.renderer.create_payload(unit);
                let issue = self.tracker.create_issue(&payload, &fingerprint)?;
                (SyncAction::Created, issue)
            }
        };
        info!(issue = %issue.reference(), action = %action, "Reconciled unit");

        Ok(UnitOutcome {
            action,
            key_path: unit.key_path.clone(),
            fingerprint,
            issue,
        })
    }

    /// Reconcile every unit, stopping at the first error.
    pub fn reconcile<'a, I, F>(&self, units: I, mut on_outcome: F) -> SyncResult<ReconciliationTotals>
    where
        I: IntoIterator<Item = &'a GroupedUnit>,
        F: FnMut(&UnitOutcome),
    {
        let mut totals = ReconciliationTotals::default();
        for unit in units {
            let outcome = self.reconcile_unit(unit)?;
            totals.record(outcome.action);
            on_outcome(&outcome);
        }
        Ok(totals)
    }
}
