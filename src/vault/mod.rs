//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - The per-host `CredentialRecord` type (`record`)
//! - The encrypted file envelope and atomic writes (`format`)
//! - `CredentialStore` and the path-based upsert/remove/reveal (`store`)

pub mod format;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use record::CredentialRecord;
pub use store::{remove_credential, reveal_credential, upsert_credential, CredentialStore};
