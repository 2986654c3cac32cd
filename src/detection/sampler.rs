//! Bounded content sampling
//!
//! Content rules never see a whole file: each read is capped in bytes at the
//! tree and then cut to a line budget. Binary files and files that cannot be
//! read produce no excerpt, which callers treat as "no match".

use super::index::TreeIndex;
use crate::fs::FileTree;
use crate::platforms::ContentRule;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Bytes inspected for the null-byte binary heuristic
const BINARY_PROBE_BYTES: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimits {
    /// Bytes read from the start of each file
    pub max_bytes: usize,
    /// Lines kept from the bytes read
    pub max_lines: usize,
    /// Files sampled per content rule
    pub max_files: usize,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024,
            max_lines: 200,
            max_files: 64,
        }
    }
}

type TextCache = RefCell<HashMap<String, Option<Rc<str>>>>;

/// Reads file text for one detector run, caching each path's result
pub struct ContentSampler<'a> {
    tree: &'a dyn FileTree,
    limits: SampleLimits,
    documents: TextCache,
    excerpts: TextCache,
}

impl<'a> ContentSampler<'a> {
    pub fn new(tree: &'a dyn FileTree, limits: SampleLimits) -> Self {
        Self {
            tree,
            limits,
            documents: RefCell::new(HashMap::new()),
            excerpts: RefCell::new(HashMap::new()),
        }
    }

    pub fn limits(&self) -> SampleLimits {
        self.limits
    }

    /// Text of a file under the byte cap only. Manifests are read this way so
    /// that long ones still parse.
    pub fn document(&self, path: &str) -> Option<Rc<str>> {
        cached(&self.documents, path, || self.read_text(path).map(Rc::from))
    }

    /// Bounded text excerpt of a file, or `None` if it is binary or unreadable
    pub fn excerpt(&self, path: &str) -> Option<Rc<str>> {
        cached(&self.excerpts, path, || {
            let text = self.document(path)?;
            let kept = truncate_lines(&text, self.limits.max_lines);
            if kept.len() == text.len() {
                Some(Rc::clone(&text))
            } else {
                Some(Rc::from(kept))
            }
        })
    }

    fn read_text(&self, path: &str) -> Option<String> {
        let bytes = match self.tree.read_bytes(path, self.limits.max_bytes) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path, error = %e, "Failed to sample file, treating as no match");
                return None;
            }
        };

        if is_binary(&bytes) {
            debug!(path, "Skipping binary file");
            return None;
        }

        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Path of the first file (in path order) matched by the rule's file
    /// pattern whose excerpt matches the rule's regex
    pub fn find_match<'i>(&self, index: &'i TreeIndex, rule: &ContentRule) -> Option<&'i str> {
        index
            .files_matching(&rule.files)
            .take(self.limits.max_files)
            .find(|entry| {
                self.excerpt(&entry.path)
                    .map(|text| rule.is_match(&text))
                    .unwrap_or(false)
            })
            .map(|entry| entry.path.as_str())
    }
}

fn cached(
    cache: &TextCache,
    path: &str,
    load: impl FnOnce() -> Option<Rc<str>>,
) -> Option<Rc<str>> {
    if let Some(hit) = cache.borrow().get(path) {
        return hit.clone();
    }
    let value = load();
    cache.borrow_mut().insert(path.to_string(), value.clone());
    value
}

/// Null-byte heuristic over the start of the sample
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_PROBE_BYTES).any(|b| *b == 0)
}

/// Keep at most `max_lines` lines of `text`
pub fn truncate_lines(text: &str, max_lines: usize) -> &str {
    if max_lines == 0 {
        return "";
    }
    match text.match_indices('\n').nth(max_lines - 1) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
