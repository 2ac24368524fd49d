//! On-disk vault envelope and atomic file replacement.
//!
//! A vault file has no magic header and no version byte:
//!
//! ```text
//! [nonce: 12 bytes][AES-256-GCM ciphertext + tag]
//! ```
//!
//! The plaintext is a JSON object `{"credentials": {<host>: <record>}}`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use super::store::CredentialStore;
use crate::crypto::{decrypt, encrypt, MasterKey};
use crate::errors::{HostVaultError, Result};

/// Serialize and encrypt a store into the vault envelope.
pub fn seal(store: &CredentialStore, key: &MasterKey) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec(store)
        .map_err(|e| HostVaultError::SerializationError(format!("credentials: {e}")))?;
    let sealed = encrypt(key.as_bytes(), &json);
    json.zeroize();
    sealed
}

/// Decrypt a vault envelope and parse the credential JSON.
///
/// Anything after the last closing brace is discarded before parsing.
/// Older writers left padding bytes behind the JSON object and those
/// files must still open.
pub fn open(blob: &[u8], key: &MasterKey) -> Result<CredentialStore> {
    let mut plaintext = decrypt(key.as_bytes(), blob)?;

    let parsed = match plaintext.iter().rposition(|&b| b == b'}') {
        Some(end) => serde_json::from_slice::<CredentialStore>(&plaintext[..=end])
            .map_err(|e| HostVaultError::CorruptData(format!("credentials JSON: {e}"))),
        None => Err(HostVaultError::CorruptData(
            "decrypted vault contains no JSON object".into(),
        )),
    };

    plaintext.zeroize();
    parsed
}

/// Read the raw vault bytes, mapping a missing file to `VaultNotFound`.
pub fn read_vault(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HostVaultError::VaultNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace `path` with `data` **atomically**.
///
/// 1. Write to a temp file in the same directory (mode 0600 on unix).
/// 2. fsync the temp file.
/// 3. Rename it over the target path.
///
/// Readers see either the old file or the new one, never a torn write.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(parent, path);

    // A leftover temp file from a crashed write would keep its old mode.
    match fs::remove_file(&tmp_path) {
        Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options.open(&tmp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    sync_dir(parent);
    Ok(())
}

/// fsync the directory so the rename itself survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
        tracing::warn!(dir = %dir.display(), error = %e, "failed to sync directory after rename");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

fn temp_path_for(parent: &Path, path: &Path) -> PathBuf {
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}
