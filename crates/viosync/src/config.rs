use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use viosync_settings::{CONFIG_FILE_NAME, SyncSettings};
use viosync_types::SyncError;

/// Settings plus the file they came from.
#[derive(Debug, Clone)]
pub(crate) struct LoadedSettings {
    pub path: PathBuf,
    pub settings: SyncSettings,
}

/// Implicit lookup order: `./viosync.toml`, then the user config dir.
pub(crate) fn candidate_paths(cwd: &Path, config_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut out = vec![cwd.join(CONFIG_FILE_NAME)];
    if let Some(dir) = config_dir {
        out.push(dir.join("viosync").join("config.toml"));
    }
    out
}

pub(crate) fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            discover(&candidate_paths(&cwd, dirs::config_dir()))?
        }
    };
    read_settings(&path)
}

fn discover(candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    let searched = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(SyncError::config(format!(
        "No configuration file found (searched: {searched})"
    ))
    .into())
}

pub(crate) fn read_settings(path: &Path) -> Result<LoadedSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings = SyncSettings::parse(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(LoadedSettings {
        path: path.to_path_buf(),
        settings,
    })
}

/// Environment lookup handed to the credential constructors.
pub(crate) fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
