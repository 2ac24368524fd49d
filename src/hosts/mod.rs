//! Hosts module: the inventory side of hostvault.
//!
//! This module provides:
//! - The reconciled `HostConfig` record (`host`)
//! - A reader for OpenSSH client config files (`ssh_config`)
//! - The merge of config hosts with vault credentials (`reconcile`)

pub mod host;
pub mod reconcile;
pub mod ssh_config;

pub use host::HostConfig;
pub use reconcile::reconcile;
pub use ssh_config::{load_ssh_config, parse_ssh_config};
