//! Analysis configuration and the shared cutoff instant.

use chrono::{Duration, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Age threshold separating current from stale files, in days.
pub const STALE_AFTER_DAYS: i64 = 30;

/// Default name of the memory subtree under a workspace root.
pub const MEMORY_DIR: &str = "memory";

/// Default name of the reserved archive directory inside the memory subtree.
pub const ARCHIVE_DIR: &str = "archive";

/// The single instant separating current from stale files.
///
/// Computed once per run and shared by every workspace so that two
/// workspaces analyzed moments apart classify against the same boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutoff(i64);

impl Cutoff {
    /// Rolling cutoff of [`STALE_AFTER_DAYS`] days before now.
    pub fn rolling() -> Self {
        Self((Utc::now() - Duration::days(STALE_AFTER_DAYS)).timestamp_millis())
    }

    /// Cutoff at an explicit epoch-millisecond instant.
    pub fn at_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Epoch milliseconds of this cutoff.
    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Whether a modification time falls on the stale side.
    ///
    /// A time exactly at the cutoff is current.
    pub fn is_stale(&self, modified_ms: i64) -> bool {
        modified_ms < self.0
    }
}

/// Configuration for one analysis run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct AnalyzeConfig {
    /// Cutoff shared by every workspace in the run.
    #[builder(default = "Cutoff::rolling()")]
    pub cutoff: Cutoff,

    /// Move stale files into the archive subtree.
    #[builder(default = "false")]
    #[serde(default)]
    pub archive: bool,

    /// Name of the memory subtree under each workspace root.
    #[builder(default = "MEMORY_DIR.to_string()")]
    pub memory_dir: String,

    /// Reserved top-level directory stale files are moved into.
    #[builder(default = "ARCHIVE_DIR.to_string()")]
    pub archive_dir: String,

    /// Extension of daily log files.
    #[builder(default = "\"md\".to_string()")]
    pub log_extension: String,
}

impl AnalyzeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("memory_dir", &self.memory_dir),
            ("archive_dir", &self.archive_dir),
        ] {
            if let Some(dir) = value {
                if dir.is_empty() || dir.contains('/') {
                    return Err(format!("{field} must be a single path component"));
                }
            }
        }
        if let Some(ext) = &self.log_extension {
            if ext.is_empty() || ext.contains('.') {
                return Err("log_extension must be a bare extension".to_string());
            }
        }
        Ok(())
    }
}

impl AnalyzeConfig {
    /// Create a new config builder.
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::default()
    }

    /// Check a file name against the anchored daily-log pattern
    /// `YYYY-MM-DD.<ext>`.
    ///
    /// The pattern applies to the file-name component only; files in
    /// subdirectories qualify by name alone.
    pub fn is_daily_log(&self, file_name: &str) -> bool {
        let Some(stem) = file_name
            .strip_suffix(self.log_extension.as_str())
            .and_then(|s| s.strip_suffix('.'))
        else {
            return false;
        };
        is_date_stamp(stem)
    }

    /// Whether a relative path already lies inside the archive subtree.
    pub fn is_archived(&self, rel_path: &str) -> bool {
        rel_path == self.archive_dir
            || rel_path
                .strip_prefix(self.archive_dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            cutoff: Cutoff::rolling(),
            archive: false,
            memory_dir: MEMORY_DIR.to_string(),
            archive_dir: ARCHIVE_DIR.to_string(),
            log_extension: "md".to_string(),
        }
    }
}

/// Anchored `YYYY-MM-DD` check: ten bytes, digits except hyphens at 4 and 7.
fn is_date_stamp(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_boundary_is_current() {
        let cutoff = Cutoff::at_millis(1_000);
        assert!(!cutoff.is_stale(1_000));
        assert!(!cutoff.is_stale(1_001));
        assert!(cutoff.is_stale(999));
    }

    #[test]
    fn test_rolling_cutoff_is_in_the_past() {
        let cutoff = Cutoff::rolling();
        assert!(cutoff.millis() < Utc::now().timestamp_millis());
    }

    #[test]
    fn test_daily_log_pattern_anchored() {
        let config = AnalyzeConfig::default();
        assert!(config.is_daily_log("2024-01-15.md"));
        assert!(config.is_daily_log("1999-12-31.md"));
        assert!(!config.is_daily_log("2024-1-15.md"));
        assert!(!config.is_daily_log("notes-2024-01-15.md"));
        assert!(!config.is_daily_log("2024-01-15.md.bak"));
        assert!(!config.is_daily_log("2024-01-15.txt"));
        assert!(!config.is_daily_log("2024-01-15"));
        assert!(!config.is_daily_log("2024_01_15.md"));
    }

    #[test]
    fn test_daily_log_custom_extension() {
        let config = AnalyzeConfig::builder()
            .log_extension("log")
            .build()
            .unwrap();
        assert!(config.is_daily_log("2024-01-15.log"));
        assert!(!config.is_daily_log("2024-01-15.md"));
    }

    #[test]
    fn test_is_archived_prefix_only() {
        let config = AnalyzeConfig::default();
        assert!(config.is_archived("archive/2024-01-15.md"));
        assert!(config.is_archived("archive/deep/old.md"));
        assert!(config.is_archived("archive"));
        assert!(!config.is_archived("archives/2024-01-15.md"));
        assert!(!config.is_archived("notes/archive/old.md"));
    }

    #[test]
    fn test_builder_rejects_nested_archive_dir() {
        let err = AnalyzeConfig::builder()
            .archive_dir("deep/archive")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("single path component"));
    }

    #[test]
    fn test_builder_rejects_dotted_extension() {
        let err = AnalyzeConfig::builder()
            .log_extension(".md")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("bare extension"));
    }

    #[test]
    fn test_default_config() {
        let config = AnalyzeConfig::default();
        assert!(!config.archive);
        assert_eq!(config.memory_dir, "memory");
        assert_eq!(config.archive_dir, "archive");
        assert_eq!(config.log_extension, "md");
    }
}
