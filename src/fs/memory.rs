use super::{FileTree, TreeEntry};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum MemoryEntry {
    File(Vec<u8>),
    Unreadable,
    Directory,
}

/// In-memory tree, populated up front and read-only once handed to the engine
#[derive(Debug, Clone)]
pub struct MemoryTree {
    root: PathBuf,
    entries: BTreeMap<String, MemoryEntry>,
    unavailable: Option<String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/memory"),
            entries: BTreeMap::new(),
            unavailable: None,
        }
    }

    /// A tree whose listing always fails, as if acquisition went wrong upstream
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::new()
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.add_dir(path);
        self
    }

    pub fn add_file(&mut self, path: &str, content: &str) {
        self.add_bytes(path, content.as_bytes());
    }

    pub fn add_bytes(&mut self, path: &str, content: &[u8]) {
        let path = normalize(path);
        self.ensure_parents(&path);
        self.entries
            .insert(path, MemoryEntry::File(content.to_vec()));
    }

    /// Listed in the tree but every read fails
    pub fn add_unreadable(&mut self, path: &str) {
        let path = normalize(path);
        self.ensure_parents(&path);
        self.entries.insert(path, MemoryEntry::Unreadable);
    }

    pub fn add_dir(&mut self, path: &str) {
        let path = normalize(path);
        self.ensure_parents(&path);
        self.entries.insert(path, MemoryEntry::Directory);
    }

    fn ensure_parents(&mut self, path: &str) {
        let mut end = 0;
        while let Some(pos) = path[end..].find('/') {
            end += pos;
            self.entries
                .entry(path[..end].to_string())
                .or_insert(MemoryEntry::Directory);
            end += 1;
        }
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree for MemoryTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn entries(&self) -> Result<Vec<TreeEntry>> {
        if let Some(reason) = &self.unavailable {
            return Err(anyhow!("{}", reason));
        }

        Ok(self
            .entries
            .iter()
            .map(|(path, entry)| match entry {
                MemoryEntry::File(content) => TreeEntry::file(path.clone(), content.len() as u64),
                MemoryEntry::Unreadable => TreeEntry::file(path.clone(), 0),
                MemoryEntry::Directory => TreeEntry::dir(path.clone()),
            })
            .collect())
    }

    fn read_bytes(&self, path: &str, max_bytes: usize) -> Result<Vec<u8>> {
        match self.entries.get(&normalize(path)) {
            Some(MemoryEntry::File(content)) => {
                Ok(content[..content.len().min(max_bytes)].to_vec())
            }
            Some(MemoryEntry::Unreadable) => Err(anyhow!("Permission denied: {}", path)),
            Some(MemoryEntry::Directory) => Err(anyhow!("Not a file: {}", path)),
            None => Err(anyhow!("File not found: {}", path)),
        }
    }
}
