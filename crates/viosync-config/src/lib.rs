//! # viosync-config
//!
//! **Tier 2 (Configuration)**
//!
//! CLI argument schema for `viosync`.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Value enums and their defaults
//!
//! ## What does NOT belong here
//! * The config file schema (see `viosync-settings`)
//! * Config discovery or any other I/O
//! * Business logic

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// `viosync`: mirror compliance violations into an issue tracker.
///
/// Violations are grouped by the configured key fields; each group becomes
/// one issue, found again on later runs by its fingerprint.
#[derive(Parser, Debug)]
#[command(name = "viosync", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to `viosync.toml`.
    ///
    /// Defaults to `./viosync.toml`, then `<config dir>/viosync/config.toml`.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging to stderr (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch the violations report and create or update one issue per group.
    Sync(SyncArgs),

    /// Group and fingerprint the report without touching the tracker.
    Preview(PreviewArgs),

    /// Write a template `viosync.toml`.
    Init(InitArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Read violations from a saved JSON report instead of the Tidelift API.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PreviewArgs {
    /// Read violations from a saved JSON report instead of the Tidelift API.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = PreviewFormat::Text)]
    pub format: PreviewFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewFormat {
    /// One line per group.
    #[default]
    Text,
    /// JSON array of groups.
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Target directory (defaults to ".").
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing `viosync.toml`.
    #[arg(long)]
    pub force: bool,

    /// Print the template to stdout instead of writing a file.
    #[arg(long)]
    pub print: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Powershell,
    Zsh,
}
