//! Memory analysis for memsweep.
//!
//! This crate classifies enumerated memory files against a shared cutoff,
//! aggregates per-workspace statistics, and optionally relocates stale
//! files into the reserved archive subtree.
//!
//! # Analysis
//!
//! Classification partitions records into current and stale sets; the
//! aggregate statistics always cover the full set regardless of whether
//! archival runs:
//!
//! ```rust,ignore
//! use memsweep_analyze::MemoryAnalyzer;
//! use memsweep_scan::WorkspaceWalker;
//!
//! let outcome = WorkspaceWalker::new().scan(memory_root)?;
//! let analyzer = MemoryAnalyzer::new();
//! let analysis = analyzer.analyze(outcome.records);
//!
//! println!("{} stale of {} bytes total",
//!     analysis.stale.len(), analysis.total_size_bytes);
//! ```
//!
//! # Fan-out
//!
//! Workspaces touch disjoint subtrees, so they are analyzed concurrently
//! and the reports joined in configuration order:
//!
//! ```rust,ignore
//! use memsweep_analyze::analyze_workspaces;
//!
//! let reports = analyze_workspaces(&workspaces, &config).await?;
//! ```

mod memory;
mod run;

pub use memory::{ArchiveOutcome, MemoryAnalysis, MemoryAnalyzer};
pub use run::{RunError, analyze_workspace, analyze_workspaces};

// Re-export core types
pub use memsweep_core::{AnalyzeConfig, Cutoff, FileRecord, MemoryReport, Workspace};
