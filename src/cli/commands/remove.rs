//! `hostvault remove`: delete a host's credential.

use crate::cli::output;
use crate::cli::{validate_host_alias, Paths};
use crate::crypto::load_master_key;
use crate::errors::Result;
use crate::vault::remove_credential;

/// Execute the `remove` command.
pub fn execute(paths: &Paths, host: &str) -> Result<()> {
    validate_host_alias(host)?;

    let key = load_master_key(&paths.master_key)?;
    remove_credential(&paths.credentials, host, &key)?;

    output::success(&format!("Credentials for '{host}' removed."));
    Ok(())
}
