use std::io::Write;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell as Target, generate};
use viosync_config::{Cli, CompletionsArgs, Shell};

fn target(shell: Shell) -> Target {
    match shell {
        Shell::Bash => Target::Bash,
        Shell::Elvish => Target::Elvish,
        Shell::Fish => Target::Fish,
        Shell::Powershell => Target::PowerShell,
        Shell::Zsh => Target::Zsh,
    }
}

pub(crate) fn handle(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut out = std::io::stdout().lock();
    generate(target(args.shell), &mut cmd, bin, &mut out);
    out.flush().context("Failed to write completions")
}
