use super::{FileTree, TreeEntry};
use anyhow::{anyhow, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Vendor, cache and build-output directories that never carry source evidence
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "venv",
    ".venv",
    "__pycache__",
    "target",
    "build",
    "dist",
    ".vscode",
    ".idea",
    "vendor",
];

/// Build output directories pruned only next to a .NET project file, since
/// `bin` is also a source convention elsewhere (`src/bin` in Rust)
pub const PROJECT_OUTPUT_DIRS: &[&str] = &["bin", "obj"];

const PROJECT_FILE_SUFFIXES: &[&str] = &[".csproj", ".fsproj", ".vbproj"];

fn has_project_file(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.filter_map(|e| e.ok()).any(|e| {
        let name = e.file_name();
        let name = name.to_string_lossy();
        PROJECT_FILE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
    })
}

#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub max_depth: usize,
    pub max_files: usize,
    pub excluded_dirs: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_files: 20_000,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

/// A project directory on the local file system
pub struct DirectoryTree {
    root: PathBuf,
    config: WalkConfig,
}

impl DirectoryTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, WalkConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: WalkConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    fn check_root(&self) -> Result<()> {
        let meta = fs::metadata(&self.root)
            .with_context(|| format!("Failed to read tree root {:?}", self.root))?;
        if !meta.is_dir() {
            return Err(anyhow!("Tree root is not a directory: {:?}", self.root));
        }
        Ok(())
    }

    fn resolve(&self, rel_path: &str) -> Result<PathBuf> {
        let rel = Path::new(rel_path);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(anyhow!("Path escapes the tree root: {}", rel_path));
        }
        Ok(self.root.join(rel))
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

impl FileTree for DirectoryTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn entries(&self) -> Result<Vec<TreeEntry>> {
        self.check_root()?;

        let excluded = self.config.excluded_dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .max_depth(Some(self.config.max_depth))
            .hidden(false)
            .parents(false)
            .git_global(false)
            .git_ignore(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .ignore(self.config.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if PROJECT_OUTPUT_DIRS.iter().any(|d| *d == name) {
                    return !entry.path().parent().is_some_and(has_project_file);
                }
                !excluded.iter().any(|d| d.as_str() == name)
            })
            .build();

        let mut entries = Vec::new();
        let mut files = 0usize;

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let Some(path) = relative_path(&self.root, entry.path()) else {
                continue;
            };

            if file_type.is_dir() {
                entries.push(TreeEntry::dir(path));
            } else if file_type.is_file() {
                if files >= self.config.max_files {
                    warn!(
                        files,
                        max_files = self.config.max_files,
                        "Reached file limit, stopping walk"
                    );
                    break;
                }
                files += 1;
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                entries.push(TreeEntry::file(path, size));
            }
        }

        debug!(
            root = %self.root.display(),
            entries = entries.len(),
            files,
            "Walked directory tree"
        );

        Ok(entries)
    }

    fn read_bytes(&self, path: &str, max_bytes: usize) -> Result<Vec<u8>> {
        let abs = self.resolve(path)?;
        let file = fs::File::open(&abs).with_context(|| format!("Failed to open file {:?}", abs))?;
        let mut buffer = Vec::with_capacity(max_bytes.min(64 * 1024));
        file.take(max_bytes as u64)
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read bytes from {:?}", abs))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("src/main/java")).unwrap();
        fs::write(base.join("pom.xml"), "<project></project>").unwrap();
        fs::write(base.join("src/main/java/App.java"), "class App {}").unwrap();
        fs::create_dir_all(base.join("node_modules/react")).unwrap();
        fs::write(base.join("node_modules/react/package.json"), "{}").unwrap();
        fs::create_dir_all(base.join("target/classes")).unwrap();
        fs::write(base.join("target/classes/App.class"), [0u8, 1, 2]).unwrap();

        dir
    }

    fn paths(tree: &DirectoryTree) -> Vec<String> {
        tree.entries()
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect()
    }

    #[test]
    fn test_entries_lists_files_and_dirs() {
        let temp = create_test_dir();
        let tree = DirectoryTree::new(temp.path());

        let entries = tree.entries().unwrap();
        let pom = entries.iter().find(|e| e.path == "pom.xml").unwrap();
        assert!(pom.is_file());
        assert_eq!(pom.size, 19);

        let java_dir = entries.iter().find(|e| e.path == "src/main/java").unwrap();
        assert!(java_dir.is_dir());
        assert!(entries.iter().any(|e| e.path == "src/main/java/App.java"));
    }

    #[test]
    fn test_entries_prunes_excluded_dirs() {
        let temp = create_test_dir();
        let tree = DirectoryTree::new(temp.path());

        let paths = paths(&tree);
        assert!(!paths.iter().any(|p| p.starts_with("node_modules")));
        assert!(!paths.iter().any(|p| p.starts_with("target")));
    }

    #[test]
    fn test_output_dirs_pruned_only_beside_project_file() {
        let temp = create_test_dir();
        let base = temp.path();
        fs::create_dir_all(base.join("Api/bin/Debug")).unwrap();
        fs::write(base.join("Api/Api.csproj"), "<Project/>").unwrap();
        fs::write(base.join("Api/bin/Debug/Api.dll"), [0u8, 1]).unwrap();
        fs::create_dir_all(base.join("tool/src/bin")).unwrap();
        fs::write(base.join("tool/src/bin/cli.rs"), "fn main() {}").unwrap();

        let paths = paths(&DirectoryTree::new(base));
        assert!(paths.contains(&"Api/Api.csproj".to_string()));
        assert!(!paths.iter().any(|p| p.starts_with("Api/bin")));
        assert!(paths.contains(&"tool/src/bin".to_string()));
        assert!(paths.contains(&"tool/src/bin/cli.rs".to_string()));
    }

    #[test]
    fn test_entries_respects_gitignore() {
        let temp = create_test_dir();
        fs::write(temp.path().join(".gitignore"), "generated/\n*.tmp\n").unwrap();
        fs::create_dir(temp.path().join("generated")).unwrap();
        fs::write(temp.path().join("generated/package.json"), "{}").unwrap();
        fs::write(temp.path().join("scratch.tmp"), "x").unwrap();

        let tree = DirectoryTree::new(temp.path());
        let paths = paths(&tree);

        assert!(!paths.iter().any(|p| p.starts_with("generated")));
        assert!(!paths.contains(&"scratch.tmp".to_string()));
        assert!(paths.contains(&"pom.xml".to_string()));
    }

    #[test]
    fn test_entries_max_depth() {
        let temp = create_test_dir();
        let config = WalkConfig {
            max_depth: 1,
            ..WalkConfig::default()
        };
        let tree = DirectoryTree::with_config(temp.path(), config);

        let paths = paths(&tree);
        assert!(paths.contains(&"pom.xml".to_string()));
        assert!(paths.contains(&"src".to_string()));
        assert!(!paths.contains(&"src/main".to_string()));
    }

    #[test]
    fn test_entries_max_files() {
        let temp = create_test_dir();
        let config = WalkConfig {
            max_files: 1,
            ..WalkConfig::default()
        };
        let tree = DirectoryTree::with_config(temp.path(), config);

        let files = tree
            .entries()
            .unwrap()
            .into_iter()
            .filter(|e| e.is_file())
            .count();
        assert_eq!(files, 1);
    }

    #[test]
    fn test_entries_missing_root() {
        let tree = DirectoryTree::new("/nonexistent/stackprobe/root");
        assert!(tree.entries().is_err());
    }

    #[test]
    fn test_entries_root_is_file() {
        let temp = create_test_dir();
        let tree = DirectoryTree::new(temp.path().join("pom.xml"));
        assert!(tree.entries().is_err());
    }

    #[test]
    fn test_read_bytes_is_bounded() {
        let temp = create_test_dir();
        let tree = DirectoryTree::new(temp.path());

        let bytes = tree.read_bytes("pom.xml", 8).unwrap();
        assert_eq!(bytes, b"<project");

        let bytes = tree.read_bytes("pom.xml", 1024).unwrap();
        assert_eq!(bytes, b"<project></project>");
    }

    #[test]
    fn test_read_bytes_rejects_escaping_paths() {
        let temp = create_test_dir();
        let tree = DirectoryTree::new(temp.path().join("src"));
        assert!(tree.read_bytes("../pom.xml", 16).is_err());
    }

    #[test]
    fn test_read_bytes_missing_file() {
        let temp = create_test_dir();
        let tree = DirectoryTree::new(temp.path());
        assert!(tree.read_bytes("missing.txt", 16).is_err());
    }
}
