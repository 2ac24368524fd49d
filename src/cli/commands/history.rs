//! `hostvault history`: show remembered parameters for a host.

use crate::cli::output;
use crate::cli::Paths;
use crate::errors::Result;
use crate::history::{HistoryCache, TransferEntry};

/// Execute the `history` command.
pub fn execute(paths: &Paths, host: &str) -> Result<()> {
    let cache = HistoryCache::load(&paths.history);

    let upload = cache.get_upload(host);
    let download = cache.get_download(host);
    let exec = cache.get_exec(host);

    if upload == TransferEntry::default()
        && download == TransferEntry::default()
        && exec.command.is_empty()
    {
        output::info(&format!("No history for '{host}'."));
        return Ok(());
    }

    if upload != TransferEntry::default() {
        println!("upload:   {} -> {}", upload.from, upload.to);
    }
    if download != TransferEntry::default() {
        println!("download: {} -> {}", download.from, download.to);
    }
    if !exec.command.is_empty() {
        println!("exec:     {}", exec.command);
    }

    Ok(())
}
