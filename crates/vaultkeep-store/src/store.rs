use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use vaultkeep_core::{Note, NoteStore, VaultError, VaultResult};

use crate::walker::{walk, WalkRules};

pub const DEFAULT_REFERENCES_DIR: &str = "references";

/// A vault on the local filesystem.
pub struct FsVault {
    root: PathBuf,
    references_dir: String,
    rules: WalkRules,
}

impl FsVault {
    pub fn open(root: impl Into<PathBuf>) -> VaultResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root));
        }
        Ok(Self {
            root,
            references_dir: DEFAULT_REFERENCES_DIR.into(),
            rules: WalkRules::default(),
        })
    }

    pub fn with_references_dir(mut self, name: impl Into<String>) -> Self {
        self.references_dir = name.into();
        self
    }

    pub fn with_rules(mut self, rules: WalkRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn references_path(&self) -> PathBuf {
        self.root.join(&self.references_dir)
    }
}

impl NoteStore for FsVault {
    fn notes(&self) -> Box<dyn Iterator<Item = PathBuf> + '_> {
        Box::new(walk(&self.root, &self.rules))
    }

    fn references(&self) -> VaultResult<Vec<PathBuf>> {
        let dir = self.references_path();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("no references directory at {}", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(VaultError::io(dir, e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VaultError::io(&dir, e))?;
            let path = entry.path();
            // Follows symlinks; dangling links are skipped.
            if path.is_file() {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "skipping non-file reference entry");
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &Path) -> VaultResult<Note> {
        let raw = fs::read_to_string(path).map_err(|e| VaultError::io(path, e))?;
        Note::parse(path, &raw)
    }

    fn write(&self, note: &Note) -> VaultResult<()> {
        let raw = note.render()?;
        fs::write(&note.path, raw).map_err(|e| VaultError::io(&note.path, e))?;
        debug!(path = %note.path.display(), "rewrote note");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
