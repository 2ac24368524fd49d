use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{HostVaultError, Result};

/// User-level configuration, loaded from `<config_dir>/hostvault.toml`.
///
/// Every field has a sensible default so hostvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name (or absolute path) of the raw master key.
    #[serde(default = "default_master_key_file")]
    pub master_key_file: String,

    /// File name (or absolute path) of the encrypted credential vault.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// File name (or absolute path) of the plaintext history cache.
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// SSH client config to read hosts from.  Falls back to
    /// `~/.ssh/config` when unset.
    #[serde(default)]
    pub ssh_config: Option<String>,

    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_master_key_file() -> String {
    "master.key".to_string()
}

fn default_credentials_file() -> String {
    "credentials.enc".to_string()
}

fn default_history_file() -> String {
    "history".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_key_file: default_master_key_file(),
            credentials_file: default_credentials_file(),
            history_file: default_history_file(),
            ssh_config: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    const FILE_NAME: &'static str = "hostvault.toml";

    /// Load settings from `<config_dir>/hostvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            HostVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the master key file.
    pub fn master_key_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.master_key_file)
    }

    /// Full path to the encrypted credential vault.
    pub fn credentials_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.credentials_file)
    }

    /// Full path to the history cache.
    pub fn history_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.history_file)
    }

    /// The SSH config path from settings, or `~/.ssh/config`.
    pub fn ssh_config_path(&self) -> Option<PathBuf> {
        match &self.ssh_config {
            Some(path) => Some(PathBuf::from(path)),
            None => default_ssh_config_path(),
        }
    }
}

/// Default per-user config directory: `<os config dir>/hostvault`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hostvault"))
}

/// `~/.ssh/config`, if a home directory is known.
pub fn default_ssh_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.master_key_file, "master.key");
        assert_eq!(s.credentials_file, "credentials.enc");
        assert_eq!(s.history_file, "history");
        assert!(s.ssh_config.is_none());
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.credentials_file, "credentials.enc");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
master_key_file = "vault.key"
credentials_file = "vault.enc"
history_file = "recent.json"
ssh_config = "/etc/ssh/ssh_config"
log_level = "debug"
"#;
        fs::write(tmp.path().join("hostvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.master_key_file, "vault.key");
        assert_eq!(settings.credentials_file, "vault.enc");
        assert_eq!(settings.history_file, "recent.json");
        assert_eq!(
            settings.ssh_config_path(),
            Some(PathBuf::from("/etc/ssh/ssh_config"))
        );
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("hostvault.toml"), "log_level = \"info\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.master_key_file, "master.key");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("hostvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(HostVaultError::ConfigError(_))));
    }

    #[test]
    fn paths_are_joined_onto_config_dir() {
        let s = Settings::default();
        let dir = Path::new("/home/user/.config/hostvault");
        assert_eq!(
            s.master_key_path(dir),
            PathBuf::from("/home/user/.config/hostvault/master.key")
        );
        assert_eq!(
            s.credentials_path(dir),
            PathBuf::from("/home/user/.config/hostvault/credentials.enc")
        );
        assert_eq!(
            s.history_path(dir),
            PathBuf::from("/home/user/.config/hostvault/history")
        );
    }

    #[test]
    fn absolute_file_settings_override_config_dir() {
        let s = Settings {
            credentials_file: "/srv/vault.enc".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            s.credentials_path(Path::new("/ignored")),
            PathBuf::from("/srv/vault.enc")
        );
    }
}
