//! `hostvault create-key`: generate the master key.

use crate::cli::output;
use crate::cli::Paths;
use crate::crypto::{generate_master_key, save_master_key};
use crate::errors::{HostVaultError, Result};

/// Execute the `create-key` command.
pub fn execute(paths: &Paths) -> Result<()> {
    let key = generate_master_key()?;

    // Exclusive create: an existing key is never replaced.
    match save_master_key(&paths.master_key, &key) {
        Ok(()) => {}
        Err(HostVaultError::MasterKeyExists(path)) => {
            output::tip("Losing the current key makes the vault unreadable; keep it.");
            return Err(HostVaultError::MasterKeyExists(path));
        }
        Err(e) => return Err(e),
    }

    output::success(&format!(
        "Master key saved to {}",
        paths.master_key.display()
    ));
    output::tip("Back this file up; without it the vault cannot be decrypted.");

    Ok(())
}
