//! hostvault: an SSH host inventory with a locally encrypted password vault.
//!
//! The library half exposes the vault (`crypto`, `vault`), the merge of
//! SSH config hosts with stored credentials (`hosts`) and the
//! best-effort interaction history (`history`).  The binary in
//! `main.rs` is a thin CLI over it.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod history;
pub mod hosts;
pub mod logging;
pub mod vault;
