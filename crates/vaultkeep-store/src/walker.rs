//! Recursive enumeration of note files under a vault root.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Which files count as notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRules {
    /// Note extension, without the dot.
    pub extension: String,
    /// Directory names (tooling state, trash, ...) whose contents are skipped.
    pub exclude_dirs: Vec<String>,
    /// File name suffixes of generated exports.
    pub exclude_suffixes: Vec<String>,
}

impl Default for WalkRules {
    fn default() -> Self {
        Self {
            extension: "md".into(),
            exclude_dirs: vec![".obsidian".into()],
            exclude_suffixes: vec![".excalidraw.md".into()],
        }
    }
}

impl WalkRules {
    /// Name-based checks for a regular file at `relative` (path below the root).
    pub fn accepts(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let extension_ok = relative
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension);
        if !extension_ok {
            return false;
        }
        if name.eq_ignore_ascii_case("README.md") || name == "index.md" {
            return false;
        }
        if self.exclude_suffixes.iter().any(|s| name.ends_with(s.as_str())) {
            return false;
        }
        !relative
            .components()
            .any(|c| self.is_excluded_dir(&c.as_os_str().to_string_lossy()))
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Lazily walk `root`, yielding every note file the rules accept. Each call
/// starts a fresh walk; order follows the filesystem.
///
/// Symbolic links are followed, so a linked note or folder is enumerated like
/// a regular one. Link cycles surface as walk errors and are skipped.
pub fn walk(root: &Path, rules: &WalkRules) -> impl Iterator<Item = PathBuf> {
    let root = root.to_path_buf();
    let rules = rules.clone();
    let prune = rules.clone();

    WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, &prune))
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable vault entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            let accepted = rules.accepts(relative);
            accepted.then(|| entry.into_path())
        })
}

fn is_pruned(entry: &DirEntry, rules: &WalkRules) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| rules.is_excluded_dir(name))
}
