//! Workspace memory enumeration for memsweep.
//!
//! This crate walks a memory subtree and produces one [`FileRecord`] per
//! regular file, with no filtering. Memory directories are assumed
//! VCS-free, so nothing is skipped by default.
//!
//! ```rust,ignore
//! use memsweep_scan::WorkspaceWalker;
//!
//! let outcome = WorkspaceWalker::new().scan("/srv/agents/athena/memory".as_ref())?;
//! println!("{} files", outcome.records.len());
//! ```

mod walker;

pub use walker::{ScanOutcome, WorkspaceWalker};

// Re-export core types
pub use memsweep_core::{FileRecord, ScanError, ScanWarning};
