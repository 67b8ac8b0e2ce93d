//! Per-workspace analysis reports.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::workspace::Workspace;

/// Aggregated result of analyzing one workspace's memory subtree.
///
/// One report per configured workspace, emitted in configuration order.
/// `archived_count` never exceeds `stale_count` and stays zero when
/// archival was not requested or the subtree is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryReport {
    /// Workspace display name.
    pub workspace: CompactString,

    /// Path of the memory subtree that was inspected.
    pub memory_path: PathBuf,

    /// Whether the memory subtree exists and is a directory.
    pub exists: bool,

    /// Files whose name matches the daily-log pattern.
    pub daily_log_count: u64,

    /// Files modified before the cutoff.
    pub stale_count: u64,

    /// Sum of all file sizes, current and stale.
    pub total_size_bytes: u64,

    /// Earliest modification time in epoch milliseconds, if any files exist.
    pub oldest_ms: Option<i64>,

    /// Latest modification time in epoch milliseconds, if any files exist.
    pub newest_ms: Option<i64>,

    /// Files moved into the archive subtree during this run.
    pub archived_count: u64,

    /// Hard failure for this workspace, if any.
    ///
    /// A failure here never suppresses the other workspaces' reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl MemoryReport {
    /// Empty-state report for a workspace without a memory subtree.
    pub fn missing(workspace: &Workspace, memory_path: PathBuf) -> Self {
        Self {
            workspace: workspace.name.clone(),
            memory_path,
            exists: false,
            daily_log_count: 0,
            stale_count: 0,
            total_size_bytes: 0,
            oldest_ms: None,
            newest_ms: None,
            archived_count: 0,
            failure: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_report_is_empty() {
        let ws = Workspace::new("athena", "/srv/agents/athena");
        let report = MemoryReport::missing(&ws, PathBuf::from("/srv/agents/athena/memory"));

        assert_eq!(report.workspace, "athena");
        assert!(!report.exists);
        assert_eq!(report.daily_log_count, 0);
        assert_eq!(report.stale_count, 0);
        assert_eq!(report.total_size_bytes, 0);
        assert_eq!(report.archived_count, 0);
        assert!(report.oldest_ms.is_none());
        assert!(report.newest_ms.is_none());
        assert!(report.failure.is_none());
    }
}
