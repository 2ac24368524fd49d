//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{default_config_dir, Settings};
use crate::crypto::load_master_key;
use crate::errors::{HostVaultError, Result};
use crate::hosts::{load_ssh_config, reconcile, HostConfig};
use crate::vault::CredentialStore;

/// hostvault CLI: SSH host inventory with an encrypted password vault.
#[derive(Parser)]
#[command(
    name = "hostvault",
    about = "SSH host inventory with an encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the master key, vault and history
    /// (default: <os config dir>/hostvault)
    #[arg(long, env = "HOSTVAULT_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// SSH client config to read hosts from (default: ~/.ssh/config)
    #[arg(long, env = "SSH_CONFIG", global = true)]
    pub ssh_config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate the master key (refuses to replace an existing one)
    CreateKey,

    /// Store or update the password for a host
    Upsert {
        /// Host alias (as in the SSH config, or a new vault-only host)
        #[arg(long)]
        host: String,

        /// Password (omit for interactive prompt)
        #[arg(long)]
        password: Option<String>,

        /// Endpoint override; makes the vault authoritative for this host
        #[arg(long)]
        hostname: Option<String>,

        /// User for the endpoint override
        #[arg(long, default_value = "root")]
        user: String,

        /// Port for the endpoint override
        #[arg(long, default_value = "22")]
        port: String,
    },

    /// Remove the stored credential for a host
    Remove {
        /// Host alias
        #[arg(long)]
        host: String,
    },

    /// Print the stored password for a host
    Reveal {
        /// Host alias
        #[arg(long)]
        host: String,
    },

    /// List all known hosts (SSH config merged with the vault)
    List,

    /// Print the endpoint of a host
    Ip {
        /// Host alias
        host: String,
    },

    /// Show remembered transfer and command parameters for a host
    History {
        /// Host alias
        host: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved file locations for one invocation.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub master_key: PathBuf,
    pub credentials: PathBuf,
    pub history: PathBuf,
    pub ssh_config: Option<PathBuf>,
}

impl Paths {
    /// Combine CLI flags with settings.  Flags win.
    pub fn resolve(cli: &Cli, config_dir: PathBuf, settings: &Settings) -> Self {
        Self {
            master_key: settings.master_key_path(&config_dir),
            credentials: settings.credentials_path(&config_dir),
            history: settings.history_path(&config_dir),
            ssh_config: cli.ssh_config.clone().or_else(|| settings.ssh_config_path()),
            config_dir,
        }
    }
}

/// The config directory from `--config-dir` or the OS default.
pub fn config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_config_dir().ok_or_else(|| {
            HostVaultError::ConfigError(
                "cannot determine the user config directory — use --config-dir".into(),
            )
        }),
    }
}

/// Parse the SSH config and merge in vault credentials.
///
/// A missing SSH config or an uninitialized vault is not an error:
/// the corresponding side simply contributes nothing.
pub fn load_hosts(paths: &Paths) -> Result<Vec<HostConfig>> {
    let configs = match &paths.ssh_config {
        Some(path) => match load_ssh_config(path) {
            Ok(configs) => configs,
            Err(HostVaultError::SshConfigNotFound(p)) => {
                tracing::info!(path = %p.display(), "no SSH config, using vault hosts only");
                Vec::new()
            }
            Err(e) => return Err(e),
        },
        None => Vec::new(),
    };

    match load_master_key(&paths.master_key) {
        Ok(key) => {
            let credentials = CredentialStore::load_or_default(&paths.credentials, &key)?;
            Ok(reconcile(&credentials, configs))
        }
        Err(HostVaultError::MasterKeyNotFound(_)) => Ok(configs),
        Err(e) => Err(e),
    }
}

/// Validate a host alias given on the command line.
///
/// Must be non-empty, without whitespace and without wildcards (the SSH
/// config parser never yields wildcard aliases, so such a record could
/// never match).
pub fn validate_host_alias(host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(HostVaultError::CommandFailed(
            "please provide a host".into(),
        ));
    }
    if host.chars().any(char::is_whitespace) {
        return Err(HostVaultError::CommandFailed(format!(
            "host '{host}' must not contain whitespace"
        )));
    }
    if host.contains('*') || host.contains('?') {
        return Err(HostVaultError::CommandFailed(format!(
            "host '{host}' must not contain wildcards"
        )));
    }
    Ok(())
}

/// Read a password for `host` from a pipe or an interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn read_password(host: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        return Ok(trimmed);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Enter password for {host}"))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| HostVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
