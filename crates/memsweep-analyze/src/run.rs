//! Per-workspace fan-out and report assembly.

use thiserror::Error;
use tracing::{info, warn};

use memsweep_core::{AnalyzeConfig, MemoryReport, Workspace};
use memsweep_scan::WorkspaceWalker;

use crate::memory::MemoryAnalyzer;

/// Whole-run failures from the fan-out layer.
///
/// Per-workspace I/O failures never surface here; they land in the
/// workspace's own report.
#[derive(Debug, Error)]
pub enum RunError {
    /// A workspace task panicked or was cancelled.
    #[error("workspace analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Analyze every workspace concurrently and join the reports in
/// configuration order.
///
/// Each workspace operates on a disjoint subtree, so the tasks share
/// nothing but the read-only config (and with it the single cutoff
/// instant for the run).
pub async fn analyze_workspaces(
    workspaces: &[Workspace],
    config: &AnalyzeConfig,
) -> Result<Vec<MemoryReport>, RunError> {
    let mut handles = Vec::with_capacity(workspaces.len());

    for workspace in workspaces {
        let workspace = workspace.clone();
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            analyze_workspace(&workspace, &config)
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await?);
    }

    Ok(reports)
}

/// Run the scan, classify, archive pipeline for one workspace.
///
/// Enumeration completes before classification begins; archival (when
/// requested and the subtree exists) starts only after classification.
pub fn analyze_workspace(workspace: &Workspace, config: &AnalyzeConfig) -> MemoryReport {
    let memory_path = workspace.root.join(&config.memory_dir);

    let outcome = match WorkspaceWalker::new().scan(&memory_path) {
        Ok(outcome) => outcome,
        Err(err) if err.is_missing_root() => {
            return MemoryReport::missing(workspace, memory_path);
        }
        Err(err) => {
            let mut report = MemoryReport::missing(workspace, memory_path);
            report.exists = true;
            report.failure = Some(err.to_string());
            return report;
        }
    };

    for warning in &outcome.warnings {
        warn!(
            workspace = %workspace.name,
            path = %warning.path.display(),
            "{}", warning.message
        );
    }

    let analyzer = MemoryAnalyzer::with_config(config.clone());
    let analysis = analyzer.analyze(outcome.records);

    let mut report = MemoryReport {
        workspace: workspace.name.clone(),
        memory_path: memory_path.clone(),
        exists: true,
        daily_log_count: analysis.daily_log_count,
        stale_count: analysis.stale.len() as u64,
        total_size_bytes: analysis.total_size_bytes,
        oldest_ms: analysis.oldest_ms,
        newest_ms: analysis.newest_ms,
        archived_count: 0,
        failure: None,
    };

    if config.archive {
        let candidates = analyzer.archive_candidates(&analysis);
        let archive_outcome = analyzer.archive(&memory_path, &candidates);
        report.archived_count = archive_outcome.archived;
        match archive_outcome.error {
            Some(err) => report.failure = Some(err.to_string()),
            None if archive_outcome.archived > 0 => {
                info!(
                    workspace = %workspace.name,
                    archived = archive_outcome.archived,
                    "archived stale memory files"
                );
            }
            None => {}
        }
    }

    report
}
