//! Merge parsed SSH config hosts with the credential vault.
//!
//! The SSH config stays authoritative for the hosts it declares, unless
//! a vault record carries a `hostname` override.  Records with an
//! override and no matching config host become synthetic hosts.

use std::collections::HashSet;

use super::host::HostConfig;
use crate::vault::CredentialStore;

/// Produce the authoritative host list.
///
/// Config hosts keep their order and come first.  Synthetic hosts
/// follow in host-name order (the vault map is sorted), each with an
/// empty `identity_file`.
pub fn reconcile(credentials: &CredentialStore, mut configs: Vec<HostConfig>) -> Vec<HostConfig> {
    let mut processed: HashSet<String> = HashSet::with_capacity(configs.len());

    for cfg in &mut configs {
        if let Some(record) = credentials.get(&cfg.host) {
            cfg.password = record.password.clone();
            if record.overrides_endpoint() {
                cfg.host_name = record.hostname.clone();
                cfg.user = record.user.clone();
                cfg.port = record.port.clone();
            }
        }
        processed.insert(cfg.host.clone());
    }

    let synthetic: Vec<HostConfig> = credentials
        .entries()
        .filter(|(host, record)| record.overrides_endpoint() && !processed.contains(*host))
        .map(|(host, record)| HostConfig {
            host: host.to_string(),
            user: record.user.clone(),
            port: record.port.clone(),
            host_name: record.hostname.clone(),
            identity_file: String::new(),
            password: record.password.clone(),
        })
        .collect();

    if !synthetic.is_empty() {
        tracing::debug!(count = synthetic.len(), "adding vault-only hosts");
    }
    configs.extend(synthetic);
    configs
}
