use crate::fs::TreeEntry;
use crate::platforms::PathPattern;

/// Sorted snapshot of a tree's entries, built once per request and shared
/// read-only by every detector
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    entries: Vec<TreeEntry>,
}

impl TreeIndex {
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries.dedup_by(|a, b| a.path == b.path);
        Self { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries
            .binary_search_by(|e| e.path.as_str().cmp(path))
            .is_ok()
    }

    /// Files matching `pattern`; the iterator borrows only the index
    pub fn files_matching(&self, pattern: &PathPattern) -> impl Iterator<Item = &TreeEntry> + '_ {
        let pattern = pattern.clone();
        self.entries
            .iter()
            .filter(move |e| e.is_file() && pattern.matches(&e.path))
    }

    pub fn dirs_matching(&self, pattern: &PathPattern) -> impl Iterator<Item = &TreeEntry> + '_ {
        let pattern = pattern.clone();
        self.entries
            .iter()
            .filter(move |e| e.is_dir() && pattern.matches(&e.path))
    }

    /// First entry of either kind matching the pattern, in path order
    pub fn first_matching(&self, pattern: &PathPattern) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| pattern.matches(&e.path))
    }
}
