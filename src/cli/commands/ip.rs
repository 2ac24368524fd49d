//! `hostvault ip`: print the endpoint a host resolves to.

use crate::cli::{load_hosts, Paths};
use crate::errors::{HostVaultError, Result};

/// Execute the `ip` command.
pub fn execute(paths: &Paths, host: &str) -> Result<()> {
    let hosts = load_hosts(paths)?;

    let found = hosts
        .iter()
        .find(|h| h.host == host)
        .ok_or_else(|| HostVaultError::CommandFailed(format!("could not find: {host}")))?;

    println!("{} -> {}", found.host, found.endpoint());
    Ok(())
}
