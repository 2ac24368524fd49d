//! Master key generation and the on-disk key file.
//!
//! The master key is 32 random bytes stored raw in a single file with
//! owner-only permissions.  There is no password and no recovery path:
//! losing the key file makes the vault permanently unreadable.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroize;

use crate::errors::{HostVaultError, Result};

/// Length of the master key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// A wrapper around the 32-byte master key that automatically zeroes
/// its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the codec).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

/// Generate a fresh master key from the operating system's CSPRNG.
pub fn generate_master_key() -> Result<MasterKey> {
    let mut bytes = [0u8; KEY_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| HostVaultError::Entropy(e.to_string()))?;
    let key = MasterKey::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Write `key` to `path` with owner-only permissions.
///
/// The file is opened with `create_new`, so an existing key is never
/// replaced; that case returns `MasterKeyExists`.
pub fn save_master_key(path: &Path, key: &MasterKey) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(HostVaultError::MasterKeyExists(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    // A half-written key file would brick the vault, so drop it on failure.
    if let Err(e) = file.write_all(key.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), "master key written");
    Ok(())
}

/// Read the master key from `path`.
///
/// A missing file is `MasterKeyNotFound`, the normal "not initialized"
/// signal.  A file of the wrong length is treated as corrupt.
pub fn load_master_key(path: &Path) -> Result<MasterKey> {
    let mut data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(HostVaultError::MasterKeyNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if data.len() != KEY_LEN {
        let len = data.len();
        data.zeroize();
        return Err(HostVaultError::CorruptData(format!(
            "master key must be exactly {KEY_LEN} bytes, got {len}"
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&data);
    data.zeroize();
    let key = MasterKey::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Load the master key, generating and saving one first if none exists.
///
/// Returns the key and whether it was freshly created.
pub fn load_or_create_master_key(path: &Path) -> Result<(MasterKey, bool)> {
    match load_master_key(path) {
        Ok(key) => Ok((key, false)),
        Err(HostVaultError::MasterKeyNotFound(_)) => {
            let key = generate_master_key()?;
            match save_master_key(path, &key) {
                Ok(()) => Ok((key, true)),
                // Another process won the race; use its key.
                Err(HostVaultError::MasterKeyExists(_)) => Ok((load_master_key(path)?, false)),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}
