//! `hostvault upsert`: add or update a host's credential.

use crate::cli::output;
use crate::cli::{read_password, validate_host_alias, Paths};
use crate::crypto::load_or_create_master_key;
use crate::errors::{HostVaultError, Result};
use crate::vault::{upsert_credential, CredentialRecord};

/// Arguments of the `upsert` command.
pub struct UpsertArgs<'a> {
    pub host: &'a str,
    pub password: Option<&'a str>,
    pub hostname: Option<&'a str>,
    pub user: &'a str,
    pub port: &'a str,
}

/// Execute the `upsert` command.
pub fn execute(paths: &Paths, args: &UpsertArgs<'_>) -> Result<()> {
    validate_host_alias(args.host)?;

    // Determine the password from the flag, a pipe or a prompt.
    let password = match args.password {
        Some(p) => {
            output::warning("Password provided on command line — it may appear in shell history.");
            zeroize::Zeroizing::new(p.to_string())
        }
        None => read_password(args.host)?,
    };

    let record = match args.hostname.filter(|h| !h.is_empty()) {
        Some(hostname) => {
            CredentialRecord::with_endpoint(password.as_str(), hostname, args.user, args.port)
        }
        None => CredentialRecord::password_only(password.as_str()),
    };

    if record.password.is_empty() && !record.overrides_endpoint() {
        return Err(HostVaultError::CommandFailed(format!(
            "nothing to store for '{}' — give a password or --hostname",
            args.host
        )));
    }

    let (key, created) = load_or_create_master_key(&paths.master_key)?;
    if created {
        output::info(&format!(
            "Master key created at {}",
            paths.master_key.display()
        ));
    }

    upsert_credential(&paths.credentials, args.host, record, &key)?;

    output::success(&format!("Credentials for '{}' updated.", args.host));
    Ok(())
}
