//! `hostvault completions`: generate shell completion scripts.
//!
//! Usage:
//!   hostvault completions bash > ~/.local/share/bash-completion/completions/hostvault
//!   hostvault completions zsh

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{HostVaultError, Result};

/// Accepted shell names, including short aliases.
const SHELLS: &[(&str, Shell)] = &[
    ("bash", Shell::Bash),
    ("zsh", Shell::Zsh),
    ("fish", Shell::Fish),
    ("powershell", Shell::PowerShell),
    ("pwsh", Shell::PowerShell),
    ("elvish", Shell::Elvish),
];

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn parse_shell(name: &str) -> Result<Shell> {
    let wanted = name.to_ascii_lowercase();
    SHELLS
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, shell)| *shell)
        .ok_or_else(|| {
            HostVaultError::CommandFailed(format!(
                "unknown shell '{name}' — supported: bash, zsh, fish, powershell, elvish"
            ))
        })
}
