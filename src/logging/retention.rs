//! Log file retention management
//!
//! Removes diagnostic log files older than the configured number of days.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use super::file_writer::LOG_FILE_PREFIX;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up log files older than the specified number of days
///
/// Only files named like our own logs are considered, and `current_log` (the file this
/// run is writing to) is never removed. Returns the number of files deleted.
pub fn cleanup_old_logs(
    logs_dir: &Path,
    retention_days: u64,
    current_log: Option<&Path>,
) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let retention = Duration::from_secs(retention_days.saturating_mul(24 * 60 * 60));
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted = 0;
    for entry in fs::read_dir(logs_dir).context("Failed to read logs directory")? {
        let entry = entry?;
        let path = entry.path();

        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log"));
        if !is_log {
            continue;
        }
        if current_log.is_some_and(|current| current == path.as_path()) {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified());
        if let Ok(modified) = modified {
            if modified < cutoff && fs::remove_file(&path).is_ok() {
                deleted += 1;
            }
        }
    }

    Ok(deleted)
}
