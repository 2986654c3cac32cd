//! FileTree abstraction over the project being inspected
//!
//! The detection engine only ever sees a [`FileTree`]. [`DirectoryTree`] walks a
//! real directory on disk; [`MemoryTree`] holds files in memory for tests and for
//! callers that already have the project contents at hand.

mod directory;
mod memory;
mod r#trait;

pub use directory::{DirectoryTree, WalkConfig, DEFAULT_EXCLUDED_DIRS};
pub use memory::MemoryTree;
pub use r#trait::{EntryKind, FileTree, TreeEntry};
