//! Configuration: user settings and default file locations.

pub mod settings;

pub use settings::{default_config_dir, default_ssh_config_path, Settings};
