//! Diagnostic logging for hostvault.
//!
//! Library code emits `tracing` events; the binary installs a stderr
//! subscriber here.  User-facing messages go through `cli::output`
//! instead, so the default level is quiet.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log level used when neither `RUST_LOG` nor settings say otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Normalize a user-supplied level name.
pub fn parse_level(value: &str) -> &'static str {
    match value.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        "off" | "none" | "disabled" => "off",
        _ => DEFAULT_LOG_LEVEL,
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level`.  Calling this twice is harmless; the
/// second install is ignored.
pub fn init(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(parse_level(level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_aliases() {
        assert_eq!(parse_level("WARNING"), "warn");
        assert_eq!(parse_level("Debug"), "debug");
        assert_eq!(parse_level("none"), "off");
    }

    #[test]
    fn parse_level_falls_back_to_default() {
        assert_eq!(parse_level("loud"), DEFAULT_LOG_LEVEL);
    }
}
