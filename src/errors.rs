use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in hostvault.
#[derive(Debug, Error)]
pub enum HostVaultError {
    // --- Not-found family (often a normal "first run" signal) ---
    #[error("Master key not found at {0} — run `hostvault create-key` first")]
    MasterKeyNotFound(PathBuf),

    #[error("Credential vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("No credential stored for host '{0}'")]
    CredentialNotFound(String),

    #[error("SSH config not found at {0}")]
    SshConfigNotFound(PathBuf),

    // --- Key store errors ---
    #[error("Master key already exists at {0} — no operation applied")]
    MasterKeyExists(PathBuf),

    #[error("Random source failed: {0}")]
    Entropy(String),

    // --- Crypto / data errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl HostVaultError {
    /// Returns `true` for the "something is absent" errors.
    ///
    /// Callers use this to tell an uninitialized vault apart from a
    /// corrupted one and initialize silently.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MasterKeyNotFound(_)
                | Self::VaultNotFound(_)
                | Self::CredentialNotFound(_)
                | Self::SshConfigNotFound(_)
        )
    }
}

/// Convenience type alias for hostvault results.
pub type Result<T> = std::result::Result<T, HostVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_family_is_distinguishable_from_corruption() {
        assert!(HostVaultError::VaultNotFound(PathBuf::from("/x")).is_not_found());
        assert!(HostVaultError::MasterKeyNotFound(PathBuf::from("/x")).is_not_found());
        assert!(HostVaultError::CredentialNotFound("web".into()).is_not_found());
        assert!(!HostVaultError::CorruptData("bad".into()).is_not_found());
        assert!(!HostVaultError::MasterKeyExists(PathBuf::from("/x")).is_not_found());
    }
}
