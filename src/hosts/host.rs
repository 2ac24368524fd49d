//! The reconciled, in-memory host record handed to the CLI/TUI layer.

/// Default SSH port applied to every parsed `Host` section.
pub const DEFAULT_PORT: &str = "22";

/// One host as the rest of the program sees it.
///
/// Built fresh on every start by merging the SSH config with the
/// credential vault; never persisted itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Alias from the `Host` line (or the vault key for synthetic hosts).
    pub host: String,
    pub user: String,
    pub port: String,
    pub host_name: String,
    pub identity_file: String,
    /// Empty when no credential is stored for this host.
    pub password: String,
}

impl HostConfig {
    /// A host with only its alias and the default port set.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT.to_string(),
            ..Self::default()
        }
    }

    /// `"<host_name>:<port>"`, the address a client would dial.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host_name, self.port)
    }

    /// Returns `true` if a password is attached to this host.
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_host_uses_default_port() {
        let host = HostConfig::new("web");
        assert_eq!(host.port, "22");
        assert!(!host.has_password());
    }

    #[test]
    fn endpoint_joins_host_name_and_port() {
        let host = HostConfig {
            host_name: "10.1.2.3".into(),
            port: "2222".into(),
            ..HostConfig::new("db")
        };
        assert_eq!(host.endpoint(), "10.1.2.3:2222");
    }
}
