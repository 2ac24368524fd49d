//! One module per subcommand; each exposes an `execute` function.

pub mod completions;
pub mod create_key;
pub mod history;
pub mod ip;
pub mod list;
pub mod remove;
pub mod reveal;
pub mod upsert;
