//! Minimal reader for OpenSSH client config files (`~/.ssh/config`).
//!
//! Only concrete `Host` aliases are kept; wildcard patterns such as
//! `Host *` or `Host web-?` and negations like `!web` are skipped.  A line
//! naming several aliases (`Host web web.prod`) yields one record per
//! alias, each carrying the section's directives.
//! Recognized directives: `User`, `Port`, `HostName`, `IdentityFile`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::host::HostConfig;
use crate::errors::{HostVaultError, Result};

/// Read and parse the SSH config at `path`.
///
/// A missing file is `SshConfigNotFound`.
pub fn load_ssh_config(path: &Path) -> Result<Vec<HostConfig>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_ssh_config(&text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HostVaultError::SshConfigNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse SSH config text into host records, preserving file order.
pub fn parse_ssh_config(text: &str) -> Vec<HostConfig> {
    let mut configs = Vec::new();
    // Records of the current section; empty outside a section or when
    // every pattern was skipped.
    let mut current: Vec<HostConfig> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((keyword, value)) = split_directive(line) else {
            continue;
        };

        if keyword.eq_ignore_ascii_case("host") {
            configs.append(&mut current);
            current = value
                .split_whitespace()
                .map(unquote)
                .filter(|pattern| is_concrete(pattern))
                .map(HostConfig::new)
                .collect();
            continue;
        }

        let keyword = keyword.to_ascii_lowercase();
        for cfg in &mut current {
            match keyword.as_str() {
                "user" => cfg.user = value.to_string(),
                "port" => cfg.port = value.to_string(),
                "hostname" => cfg.host_name = value.to_string(),
                "identityfile" => cfg.identity_file = value.to_string(),
                _ => {}
            }
        }
    }

    configs.append(&mut current);

    configs
}

/// Split `Keyword value` or `Keyword=value` into its two halves.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let split_at = line.find(|c: char| c.is_whitespace() || c == '=')?;
    let (keyword, rest) = line.split_at(split_at);
    let value = rest
        .trim_start()
        .strip_prefix('=')
        .unwrap_or(rest)
        .trim();
    if value.is_empty() {
        return None;
    }
    Some((keyword, unquote(value)))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn is_concrete(pattern: &str) -> bool {
    !pattern.is_empty() && !pattern.starts_with('!') && !pattern.contains(['*', '?'])
}
