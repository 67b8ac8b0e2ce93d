//! JWalk-based recursive file enumeration.

use std::path::Path;
use std::time::UNIX_EPOCH;

use jwalk::WalkDir;

use memsweep_core::{FileRecord, ScanError, ScanWarning, WarningKind, epoch_millis};

/// Everything found under a memory root in one pass.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// One record per regular file, in no particular order.
    pub records: Vec<FileRecord>,
    /// Entries that could not be read or stat'ed.
    pub warnings: Vec<ScanWarning>,
}

/// Recursive enumerator for a workspace memory subtree.
///
/// Enumeration performs one stat per file, which dominates the cost on
/// large trees; callers scan each workspace once per run and reuse the
/// records.
pub struct WorkspaceWalker;

impl WorkspaceWalker {
    /// Create a new walker.
    pub fn new() -> Self {
        Self
    }

    /// Enumerate every regular file beneath `root`.
    ///
    /// Hidden files are included and symlinks are not followed. An absent
    /// root returns [`ScanError::NotFound`]; a root that is not a
    /// directory returns [`ScanError::NotADirectory`]. The analyzer maps
    /// both to an empty-state result.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome, ScanError> {
        let metadata = std::fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let mut outcome = ScanOutcome::default();

        let walker = WalkDir::new(root).skip_hidden(false).follow_links(false);

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    outcome.warnings.push(ScanWarning::new(
                        path,
                        err.to_string(),
                        WarningKind::ReadError,
                    ));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    outcome.warnings.push(ScanWarning::new(
                        &path,
                        err.to_string(),
                        WarningKind::MetadataError,
                    ));
                    continue;
                }
            };

            let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
            outcome.records.push(FileRecord {
                rel_path: relative_path(root, &path),
                modified_ms: epoch_millis(modified),
                size: metadata.len(),
                path,
            });
        }

        Ok(outcome)
    }
}

impl Default for WorkspaceWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative path from `root` to `path`, `/`-separated on every platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for component in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}
