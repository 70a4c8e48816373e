use anyhow::{Context, Result};
use viosync_config::{GlobalArgs, PreviewArgs, PreviewFormat};
use viosync_core::{PreviewEntry, preview_workflow};
use viosync_render::AdfRenderer;
use viosync_tidelift::ReportSource;

use crate::commands::report_source;
use crate::config::load_settings;

pub(crate) fn handle(args: PreviewArgs, global: &GlobalArgs) -> Result<()> {
    let loaded = load_settings(global.config.as_deref())?;
    let settings = &loaded.settings;
    let key_fields = settings.key_fields()?;
    tracing::info!(config = %loaded.path.display(), "Starting preview");

    let boxed = report_source(settings, args.report.as_deref())?;
    let source: &dyn ReportSource = &*boxed;
    let renderer = AdfRenderer::new(settings.jira.description_fields.iter());

    let entries = preview_workflow(&source, &renderer, &key_fields)?;
    print!("{}", render(&entries, args.format)?);
    Ok(())
}

fn render(entries: &[PreviewEntry], format: PreviewFormat) -> Result<String> {
    Ok(match format {
        PreviewFormat::Text => entries
            .iter()
            .map(|e| format!("{}  {}  ({} violations)\n", e.fingerprint, e.summary, e.violations))
            .collect(),
        PreviewFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(entries).context("Failed to serialize preview")?;
            out.push('\n');
            out
        }
    })
}
