//! Core types and configuration for memsweep.
//!
//! This crate provides the fundamental data structures shared across the
//! memsweep workspace: workspace and file records, per-workspace reports,
//! the analysis configuration, and error types.

mod config;
mod error;
mod record;
mod report;
mod workspace;

pub use config::{ARCHIVE_DIR, AnalyzeConfig, AnalyzeConfigBuilder, Cutoff, MEMORY_DIR, STALE_AFTER_DAYS};
pub use error::{ArchiveError, ScanError, ScanWarning, WarningKind};
pub use record::{FileRecord, epoch_millis};
pub use report::MemoryReport;
pub use workspace::Workspace;
