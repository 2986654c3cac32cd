//! FileTree trait definition

use anyhow::Result;
use std::path::Path;

/// Type of tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single path in a file tree, relative to the tree root and `/`-separated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
    pub size: u64,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size: 0,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Last path component
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Number of directories between the tree root and this entry
    pub fn depth(&self) -> usize {
        self.path.matches('/').count()
    }
}

/// Read-only view over a project tree.
///
/// Implementations must be safe to share between detector tasks; the engine
/// never mutates a tree and reads it concurrently without locking.
pub trait FileTree: Send + Sync {
    /// Root the relative paths are resolved against (used for logging)
    fn root(&self) -> &Path;

    /// List every file and directory in the tree.
    ///
    /// An error here means the tree as a whole cannot be read.
    fn entries(&self) -> Result<Vec<TreeEntry>>;

    /// Read at most `max_bytes` from the start of a file
    fn read_bytes(&self, path: &str, max_bytes: usize) -> Result<Vec<u8>>;
}
