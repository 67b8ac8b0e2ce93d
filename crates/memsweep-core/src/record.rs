//! File records produced by enumeration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One regular file discovered under a workspace's memory subtree.
///
/// Records are created during enumeration and never mutated; each re-run
/// supersedes the previous set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path as observed during enumeration.
    pub path: PathBuf,

    /// Path relative to the memory root, `/`-separated on every platform.
    pub rel_path: String,

    /// Last modification time in epoch milliseconds.
    pub modified_ms: i64,

    /// Size in bytes.
    pub size: u64,
}

impl FileRecord {
    /// File-name component of the relative path.
    pub fn file_name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }
}

/// Convert a system time to epoch milliseconds.
///
/// Pre-epoch times map to negative values rather than failing.
pub fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(err) => -(err.duration().as_millis() as i64),
    }
}
