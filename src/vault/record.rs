//! The per-host secret record stored inside the vault.
//!
//! Records serialize with PascalCase field names:
//!
//! ```json
//! {"Password": "...", "Hostname": "10.0.0.1", "User": "root", "Port": "22"}
//! ```
//!
//! Older vaults stored a bare password string per host.  Those still
//! deserialize, as a record with only `password` set.

use serde::{Deserialize, Serialize};

/// Secret and optional connection overrides for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "StoredRecord")]
pub struct CredentialRecord {
    pub password: String,

    /// When non-empty, this record is authoritative for the host's
    /// connection parameters (`hostname`, `user`, `port`).
    pub hostname: String,

    pub user: String,

    pub port: String,
}

impl CredentialRecord {
    /// A record that only carries a password.
    pub fn password_only(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Self::default()
        }
    }

    /// A record that carries a password and overrides the endpoint.
    pub fn with_endpoint(
        password: impl Into<String>,
        hostname: impl Into<String>,
        user: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            password: password.into(),
            hostname: hostname.into(),
            user: user.into(),
            port: port.into(),
        }
    }

    /// Returns `true` if this record overrides connection parameters.
    pub fn overrides_endpoint(&self) -> bool {
        !self.hostname.is_empty()
    }
}

/// Every record shape found in vault files on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Bare(String),
    Structured(StructuredRecord),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StructuredRecord {
    #[serde(default)]
    password: String,
    #[serde(default)]
    hostname: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    port: String,
}

impl From<StoredRecord> for CredentialRecord {
    fn from(stored: StoredRecord) -> Self {
        match stored {
            StoredRecord::Bare(password) => Self::password_only(password),
            StoredRecord::Structured(r) => Self {
                password: r.password,
                hostname: r.hostname,
                user: r.user,
                port: r.port,
            },
        }
    }
}
