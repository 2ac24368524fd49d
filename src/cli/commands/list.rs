//! `hostvault list`: display all known hosts in a table.

use crate::cli::output;
use crate::cli::{load_hosts, Paths};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(paths: &Paths) -> Result<()> {
    let hosts = load_hosts(paths)?;

    let with_password = hosts.iter().filter(|h| h.has_password()).count();
    output::info(&format!(
        "{} host(s), {} with a stored password",
        hosts.len(),
        with_password
    ));

    output::print_hosts_table(&hosts);

    Ok(())
}
