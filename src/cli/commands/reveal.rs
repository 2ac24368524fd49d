//! `hostvault reveal`: print a host's stored password.

use crate::cli::{validate_host_alias, Paths};
use crate::crypto::load_master_key;
use crate::errors::Result;
use crate::vault::reveal_credential;

/// Execute the `reveal` command.
pub fn execute(paths: &Paths, host: &str) -> Result<()> {
    validate_host_alias(host)?;

    let key = load_master_key(&paths.master_key)?;
    let password = zeroize::Zeroizing::new(reveal_credential(&paths.credentials, host, &key)?);

    // Plain stdout so the value can be piped.
    println!("{}", password.as_str());
    Ok(())
}
