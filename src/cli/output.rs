//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::hosts::HostConfig;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the reconciled host list.  Passwords are never shown.
pub fn print_hosts_table(hosts: &[HostConfig]) {
    if hosts.is_empty() {
        info("No hosts found in the SSH config or the vault.");
        tip("Run `hostvault upsert --host <name> --hostname <addr>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Host", "HostName", "User", "Port", "IdentityFile", "Password"]);

    for h in hosts {
        table.add_row(vec![
            h.host.clone(),
            h.host_name.clone(),
            h.user.clone(),
            h.port.clone(),
            h.identity_file.clone(),
            if h.has_password() { "yes" } else { "" }.to_string(),
        ]);
    }

    println!("{table}");
}
