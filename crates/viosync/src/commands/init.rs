use std::fs;

use anyhow::{Context, Result, bail};
use viosync_config::InitArgs;
use viosync_settings::{CONFIG_FILE_NAME, SyncSettings};

pub(crate) fn handle(args: InitArgs) -> Result<()> {
    let template = SyncSettings::template();

    if args.print {
        print!("{template}");
        return Ok(());
    }

    if !args.dir.exists() {
        bail!("Directory does not exist: {}", args.dir.display());
    }

    let path = args.dir.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite, or --print to just view the template.",
            path.display()
        );
    }

    fs::write(&path, template).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(())
}
