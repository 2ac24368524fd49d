//! High-level credential vault operations used by CLI commands.
//!
//! `CredentialStore` is the decrypted, in-memory view of the vault.
//! The path-based helpers (`upsert_credential`, `remove_credential`,
//! `reveal_credential`) each run one full load → modify → save cycle
//! and rewrite the whole encrypted file.  Concurrent writers are not
//! supported.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::format;
use super::record::CredentialRecord;
use crate::crypto::MasterKey;
use crate::errors::{HostVaultError, Result};

/// Map of host name → credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStore {
    #[serde(rename = "credentials", default, deserialize_with = "null_as_empty")]
    entries: BTreeMap<String, CredentialRecord>,
}

impl CredentialStore {
    /// An empty store, as used before the vault file exists.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read and decrypt the vault at `path`.
    ///
    /// Fails with `VaultNotFound` if the file does not exist and with
    /// `CorruptData` if it cannot be decrypted or parsed.
    pub fn load(path: &Path, key: &MasterKey) -> Result<Self> {
        let blob = format::read_vault(path)?;
        let store = format::open(&blob, key)?;
        tracing::debug!(path = %path.display(), entries = store.len(), "vault loaded");
        Ok(store)
    }

    /// Like `load`, but an absent vault yields an empty store.
    pub fn load_or_default(path: &Path, key: &MasterKey) -> Result<Self> {
        match Self::load(path, key) {
            Err(HostVaultError::VaultNotFound(_)) => Ok(Self::new()),
            other => other,
        }
    }

    /// Encrypt and write the whole store to `path` via temp file + rename.
    pub fn save(&self, path: &Path, key: &MasterKey) -> Result<()> {
        let blob = format::seal(self, key)?;
        format::write_atomic(path, &blob)?;
        tracing::debug!(path = %path.display(), entries = self.len(), "vault saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Look up the record for `host`.
    pub fn get(&self, host: &str) -> Option<&CredentialRecord> {
        self.entries.get(host)
    }

    /// Insert or replace the record for `host`.
    pub fn insert(&mut self, host: impl Into<String>, record: CredentialRecord) {
        self.entries.insert(host.into(), record);
    }

    /// Remove the record for `host`, returning it if present.
    pub fn remove(&mut self, host: &str) -> Option<CredentialRecord> {
        self.entries.remove(host)
    }

    /// Iterate entries in host-name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CredentialRecord)> {
        self.entries.iter().map(|(host, record)| (host.as_str(), record))
    }

    /// Host names with a stored credential, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ----------------------------------------------------------------------
// Path-based operations
// ----------------------------------------------------------------------

/// Set the record for `host`, creating the vault if it does not exist.
pub fn upsert_credential(
    path: &Path,
    host: &str,
    record: CredentialRecord,
    key: &MasterKey,
) -> Result<()> {
    let mut store = CredentialStore::load_or_default(path, key)?;
    store.insert(host, record);
    store.save(path, key)
}

/// Delete the record for `host`.
///
/// An absent host is not an error; the vault is still rewritten.  A
/// missing vault file propagates `VaultNotFound`.
pub fn remove_credential(path: &Path, host: &str, key: &MasterKey) -> Result<()> {
    let mut store = CredentialStore::load(path, key)?;
    if store.remove(host).is_none() {
        tracing::debug!(host, "no credential to remove");
    }
    store.save(path, key)
}

/// Return the password stored for `host`.
pub fn reveal_credential(path: &Path, host: &str, key: &MasterKey) -> Result<String> {
    let store = CredentialStore::load(path, key)?;
    store
        .get(host)
        .map(|record| record.password.clone())
        .ok_or_else(|| HostVaultError::CredentialNotFound(host.to_string()))
}

/// Vaults written by older tools may carry `"credentials": null`.
fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, CredentialRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<BTreeMap<String, CredentialRecord>>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_credentials_map_parses_as_empty() {
        let store: CredentialStore = serde_json::from_str(r#"{"credentials":null}"#).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn serializes_under_credentials_key_in_host_order() {
        let mut store = CredentialStore::new();
        store.insert("zeta", CredentialRecord::password_only("z"));
        store.insert("alpha", CredentialRecord::password_only("a"));

        let json = serde_json::to_string(&store).unwrap();
        assert!(json.starts_with(r#"{"credentials":{"alpha":"#));
        assert_eq!(store.hosts(), vec!["alpha", "zeta"]);
    }
}
