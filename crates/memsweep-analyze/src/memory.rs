//! Classification, aggregation, and archival of memory files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use memsweep_core::{AnalyzeConfig, ArchiveError, FileRecord};

/// Partitioned records and aggregate statistics for one workspace.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnalysis {
    /// Files modified at or after the cutoff.
    pub current: Vec<FileRecord>,

    /// Files modified before the cutoff.
    pub stale: Vec<FileRecord>,

    /// Files whose name matches the daily-log pattern.
    pub daily_log_count: u64,

    /// Sum of all file sizes, current and stale.
    pub total_size_bytes: u64,

    /// Earliest modification time, epoch milliseconds.
    pub oldest_ms: Option<i64>,

    /// Latest modification time, epoch milliseconds.
    pub newest_ms: Option<i64>,
}

impl MemoryAnalysis {
    /// Total number of files across both partitions.
    pub fn total_files(&self) -> u64 {
        (self.current.len() + self.stale.len()) as u64
    }
}

/// Outcome of one workspace's archival pass.
#[derive(Debug, Default)]
pub struct ArchiveOutcome {
    /// Moves that completed before any failure.
    pub archived: u64,

    /// First hard failure, if the pass was aborted.
    pub error: Option<ArchiveError>,
}

/// Memory analyzer/archiver for a single workspace.
pub struct MemoryAnalyzer {
    config: AnalyzeConfig,
}

impl MemoryAnalyzer {
    /// Create a new analyzer with default config.
    pub fn new() -> Self {
        Self {
            config: AnalyzeConfig::default(),
        }
    }

    /// Create a new analyzer with custom config.
    pub fn with_config(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// The configuration this analyzer runs with.
    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Partition records against the cutoff and aggregate statistics.
    ///
    /// A record modified exactly at the cutoff is current. Statistics
    /// cover the full set whether or not archival runs afterwards.
    pub fn analyze(&self, records: Vec<FileRecord>) -> MemoryAnalysis {
        let mut analysis = MemoryAnalysis::default();

        for record in records {
            if self.config.is_daily_log(record.file_name()) {
                analysis.daily_log_count += 1;
            }
            analysis.total_size_bytes += record.size;
            analysis.oldest_ms = Some(
                analysis
                    .oldest_ms
                    .map_or(record.modified_ms, |ms| ms.min(record.modified_ms)),
            );
            analysis.newest_ms = Some(
                analysis
                    .newest_ms
                    .map_or(record.modified_ms, |ms| ms.max(record.modified_ms)),
            );

            if self.config.cutoff.is_stale(record.modified_ms) {
                analysis.stale.push(record);
            } else {
                analysis.current.push(record);
            }
        }

        analysis
    }

    /// Stale records eligible for archival.
    ///
    /// Files already under the archive subtree stay where they are, which
    /// keeps a repeated archive run from re-moving them.
    pub fn archive_candidates<'a>(&self, analysis: &'a MemoryAnalysis) -> Vec<&'a FileRecord> {
        analysis
            .stale
            .iter()
            .filter(|record| !self.config.is_archived(&record.rel_path))
            .collect()
    }

    /// Move candidates into the archive subtree, preserving relative paths.
    ///
    /// Not transactional: a hard failure aborts the remaining moves and
    /// `archived` reflects exactly the moves that already succeeded. A
    /// source that vanished before its move is skipped without counting
    /// either way, so two concurrent runs do not trip over each other's
    /// completed moves.
    pub fn archive(&self, memory_root: &Path, candidates: &[&FileRecord]) -> ArchiveOutcome {
        let mut outcome = ArchiveOutcome::default();
        let archive_root = memory_root.join(&self.config.archive_dir);

        for record in candidates {
            let dest = archive_root.join(&record.rel_path);

            if let Some(parent) = dest.parent() {
                if let Err(source) = fs::create_dir_all(parent) {
                    outcome.error = Some(ArchiveError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    });
                    break;
                }
            }

            if dest.exists() {
                outcome.error = Some(ArchiveError::DestinationExists { path: dest });
                break;
            }

            match fs::rename(&record.path, &dest) {
                Ok(()) => outcome.archived += 1,
                Err(source) if source.kind() == ErrorKind::NotFound => {
                    // Already relocated elsewhere; neither an error nor a
                    // successful move.
                    debug!(path = %record.path.display(), "source vanished before move");
                }
                Err(source) => {
                    outcome.error = Some(ArchiveError::Move {
                        from: record.path.clone(),
                        to: dest,
                        source,
                    });
                    break;
                }
            }
        }

        outcome
    }
}

impl Default for MemoryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memsweep_core::Cutoff;
    use std::path::PathBuf;

    fn record(rel: &str, modified_ms: i64, size: u64) -> FileRecord {
        FileRecord {
            path: PathBuf::from("/ws/memory").join(rel),
            rel_path: rel.to_string(),
            modified_ms,
            size,
        }
    }

    fn analyzer_with_cutoff(cutoff_ms: i64) -> MemoryAnalyzer {
        let config = AnalyzeConfig::builder()
            .cutoff(Cutoff::at_millis(cutoff_ms))
            .build()
            .unwrap();
        MemoryAnalyzer::with_config(config)
    }

    #[test]
    fn test_partition_is_complete_and_boundary_inclusive() {
        let analyzer = analyzer_with_cutoff(1_000);
        let analysis = analyzer.analyze(vec![
            record("old.md", 999, 1),
            record("boundary.md", 1_000, 2),
            record("new.md", 1_001, 3),
        ]);

        assert_eq!(analysis.stale.len(), 1);
        assert_eq!(analysis.current.len(), 2);
        assert_eq!(analysis.total_files(), 3);
        assert_eq!(analysis.stale[0].rel_path, "old.md");
        assert!(analysis.current.iter().any(|r| r.rel_path == "boundary.md"));
    }

    #[test]
    fn test_daily_log_count_is_anchored() {
        let analyzer = analyzer_with_cutoff(0);
        let analysis = analyzer.analyze(vec![
            record("2024-01-15.md", 1, 1),
            record("notes/2024-02-20.md", 1, 1),
            record("2024-1-15.md", 1, 1),
            record("notes-2024-01-15.md", 1, 1),
            record("context.md", 1, 1),
        ]);

        assert_eq!(analysis.daily_log_count, 2);
        assert!(analysis.daily_log_count <= analysis.total_files());
    }

    #[test]
    fn test_totals_include_zero_byte_files() {
        let analyzer = analyzer_with_cutoff(0);
        let analysis = analyzer.analyze(vec![
            record("a.md", 1, 100),
            record("b.md", 2, 0),
            record("c.md", 3, 23),
        ]);

        assert_eq!(analysis.total_size_bytes, 123);
    }

    #[test]
    fn test_oldest_and_newest_span_both_partitions() {
        let analyzer = analyzer_with_cutoff(500);
        let analysis = analyzer.analyze(vec![
            record("stale.md", 100, 1),
            record("current.md", 900, 1),
        ]);

        assert_eq!(analysis.oldest_ms, Some(100));
        assert_eq!(analysis.newest_ms, Some(900));
        assert!(analysis.oldest_ms <= analysis.newest_ms);
    }

    #[test]
    fn test_empty_set_has_no_timestamps() {
        let analyzer = analyzer_with_cutoff(0);
        let analysis = analyzer.analyze(Vec::new());

        assert!(analysis.oldest_ms.is_none());
        assert!(analysis.newest_ms.is_none());
        assert_eq!(analysis.total_size_bytes, 0);
        assert_eq!(analysis.total_files(), 0);
    }

    #[test]
    fn test_archived_files_are_not_candidates() {
        let analyzer = analyzer_with_cutoff(1_000);
        let analysis = analyzer.analyze(vec![
            record("archive/2023-05-01.md", 10, 1),
            record("2023-06-01.md", 20, 1),
        ]);

        // Both are stale, but only the un-archived one is a candidate.
        assert_eq!(analysis.stale.len(), 2);
        let candidates = analyzer.archive_candidates(&analysis);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rel_path, "2023-06-01.md");
    }

    #[test]
    fn test_vanished_source_is_tolerated() {
        let temp = tempfile::TempDir::new().unwrap();
        let analyzer = analyzer_with_cutoff(i64::MAX);

        let ghost = record("ghost.md", 0, 1);
        let ghost = FileRecord {
            path: temp.path().join("ghost.md"),
            ..ghost
        };

        let outcome = analyzer.archive(temp.path(), &[&ghost]);
        assert_eq!(outcome.archived, 0);
        assert!(outcome.error.is_none());
    }
}
