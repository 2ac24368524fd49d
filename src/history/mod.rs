//! Interaction history: last-used transfer and command parameters.
//!
//! A plaintext JSON map stored next to the vault, keyed
//! `"<host>:upload"`, `"<host>:download"` and `"<host>:exec"`.  Values
//! are not secrets and only pre-fill input fields.
//!
//! Designed for graceful degradation: a missing or broken file is
//! replaced with an empty one, and write failures are logged and
//! swallowed.  Nothing here ever fails the caller.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::vault::format::write_atomic;

/// Source/destination pair of the last file transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferEntry {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// The last command executed on a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecEntry {
    #[serde(default)]
    pub command: String,
}

/// Everything remembered under one history key.
///
/// Stored flat on disk: `{"From": .., "To": .., "Command": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostHistoryEntry {
    #[serde(flatten)]
    pub transfer: TransferEntry,
    #[serde(flatten)]
    pub exec: ExecEntry,
}

/// Which interaction a history key records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Upload,
    Download,
    Exec,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Exec => "exec",
        }
    }

    /// Composite map key, e.g. `web:upload`.
    pub fn key_for(&self, host: &str) -> String {
        format!("{host}:{}", self.as_str())
    }
}

/// Owned history state backed by a single JSON file.
#[derive(Debug)]
pub struct HistoryCache {
    path: PathBuf,
    entries: BTreeMap<String, HostHistoryEntry>,
}

impl HistoryCache {
    /// Open the history file at `path`.
    ///
    /// Absent or unparsable files yield an empty cache and are
    /// recreated on disk.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "history file broken, starting with an empty one"
                    );
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read history file");
                None
            }
        };

        match entries {
            Some(entries) => Self {
                path: path.to_path_buf(),
                entries,
            },
            None => {
                let cache = Self {
                    path: path.to_path_buf(),
                    entries: BTreeMap::new(),
                };
                cache.persist();
                cache
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn get_upload(&self, host: &str) -> TransferEntry {
        self.entry(HistoryKind::Upload, host).transfer
    }

    pub fn get_download(&self, host: &str) -> TransferEntry {
        self.entry(HistoryKind::Download, host).transfer
    }

    pub fn get_exec(&self, host: &str) -> ExecEntry {
        self.entry(HistoryKind::Exec, host).exec
    }

    fn entry(&self, kind: HistoryKind, host: &str) -> HostHistoryEntry {
        self.entries
            .get(&kind.key_for(host))
            .cloned()
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Remember the last upload for `host`.  Returns `true` if the
    /// value changed.
    pub fn put_upload(&mut self, host: &str, transfer: TransferEntry) -> bool {
        self.update(HistoryKind::Upload, host, |e| &mut e.transfer, transfer)
    }

    /// Remember the last download for `host`.
    pub fn put_download(&mut self, host: &str, transfer: TransferEntry) -> bool {
        self.update(HistoryKind::Download, host, |e| &mut e.transfer, transfer)
    }

    /// Remember the last command run on `host`.
    pub fn put_exec(&mut self, host: &str, exec: ExecEntry) -> bool {
        self.update(HistoryKind::Exec, host, |e| &mut e.exec, exec)
    }

    fn update<T: PartialEq>(
        &mut self,
        kind: HistoryKind,
        host: &str,
        field: impl FnOnce(&mut HostHistoryEntry) -> &mut T,
        value: T,
    ) -> bool {
        let key = kind.key_for(host);
        let mut entry = self.entries.get(&key).cloned().unwrap_or_default();
        let slot = field(&mut entry);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.entries.insert(key, entry);
        self.persist();
        true
    }

    /// Rewrite the whole history file.  Failures are only logged.
    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.entries) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize history cache");
                return;
            }
        };
        if let Err(e) = write_atomic(&self.path, &bytes) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to update history cache");
        }
    }
}
