//! Workspace identity.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A named root directory representing one agent's working area.
///
/// Workspaces are built at configuration time and never mutated; the
/// memory subtree to inspect is derived from `root` at analysis time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Display name used in reports.
    pub name: CompactString,

    /// Absolute root path of the workspace.
    pub root: PathBuf,
}

impl Workspace {
    /// Create a workspace with an explicit display name.
    pub fn new(name: impl Into<CompactString>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Derive a workspace from a bare path, named after its final component.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_else(|| CompactString::new(root.to_string_lossy()));
        Self { name, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root_uses_final_component() {
        let ws = Workspace::from_root("/home/agents/athena");
        assert_eq!(ws.name, "athena");
        assert_eq!(ws.root, PathBuf::from("/home/agents/athena"));
    }

    #[test]
    fn test_explicit_name_wins() {
        let ws = Workspace::new("scout", "/srv/agents/scout-main");
        assert_eq!(ws.name, "scout");
    }
}
