pub(crate) mod completions;
pub(crate) mod init;
pub(crate) mod preview;
pub(crate) mod sync;

use std::path::Path;

use anyhow::Result;
use viosync_config::{Cli, Commands};
use viosync_settings::{SyncSettings, TideliftCredentials};
use viosync_tidelift::{FileReportSource, ReportSource, TideliftClient};

use crate::config::env_lookup;

pub(crate) fn dispatch(cli: Cli) -> Result<()> {
    let global = &cli.global;
    match cli.command {
        Commands::Sync(args) => sync::handle(args, global),
        Commands::Preview(args) => preview::handle(args, global),
        Commands::Init(args) => init::handle(args),
        Commands::Completions(args) => completions::handle(args),
    }
}

/// A saved report when `--report` is given, otherwise the Tidelift API.
pub(crate) fn report_source(
    settings: &SyncSettings,
    report: Option<&Path>,
) -> Result<Box<dyn ReportSource>> {
    if let Some(path) = report {
        return Ok(Box::new(FileReportSource::new(path)));
    }
    let credentials = TideliftCredentials::from_lookup(env_lookup)?;
    let client = TideliftClient::new(&settings.tidelift, credentials, settings.http.timeout())?;
    Ok(Box::new(client))
}
