use anyhow::{Context, Result};
use viosync_config::{GlobalArgs, SyncArgs};
use viosync_core::{UnitOutcome, sync_workflow};
use viosync_jira::{JiraClient, JiraTracker};
use viosync_render::AdfRenderer;
use viosync_settings::JiraCredentials;
use viosync_tidelift::ReportSource;
use viosync_types::SyncAction;

use crate::commands::report_source;
use crate::config::{env_lookup, load_settings};

pub(crate) fn handle(args: SyncArgs, global: &GlobalArgs) -> Result<()> {
    let loaded = load_settings(global.config.as_deref())?;
    let settings = &loaded.settings;
    let key_fields = settings.key_fields()?;
    tracing::info!(config = %loaded.path.display(), "Starting sync");

    let jira_credentials = JiraCredentials::from_lookup(env_lookup)?;
    let client = JiraClient::new(
        &settings.jira.api_base,
        jira_credentials,
        settings.http.timeout(),
    )?;
    let tracker = JiraTracker::connect(client, &settings.jira)
        .context("Failed to resolve the Jira unique field")?;

    let boxed = report_source(settings, args.report.as_deref())?;
    let source: &dyn ReportSource = &*boxed;
    let renderer = AdfRenderer::new(settings.jira.description_fields.iter());

    let totals = sync_workflow(&source, &tracker, &renderer, &key_fields, |outcome| {
        println!("{}", outcome_line(outcome));
    })?;
    println!("{totals}");
    Ok(())
}

/// `<key or id> Created` for new issues, `<id> Updated` for existing ones.
fn outcome_line(outcome: &UnitOutcome) -> String {
    match outcome.action {
        SyncAction::Created => format!("{} {}", outcome.issue.reference(), outcome.action),
        SyncAction::Updated => format!("{} {}", outcome.issue.id, outcome.action),
    }
}
