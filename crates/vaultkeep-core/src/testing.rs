//! In-memory `NoteStore` for unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};
use crate::note::Note;
use crate::store::NoteStore;

const REFERENCES: &str = "references";

/// Notes keyed by vault-relative path, enumerated in path order.
#[derive(Default)]
pub struct MemoryVault {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: RefCell<Vec<PathBuf>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, raw: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), raw.to_string());
        self
    }

    pub fn raw(&self, path: &str) -> String {
        self.files
            .borrow()
            .get(Path::new(path))
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl NoteStore for MemoryVault {
    fn notes(&self) -> Box<dyn Iterator<Item = PathBuf> + '_> {
        let paths: Vec<PathBuf> = self.files.borrow().keys().cloned().collect();
        Box::new(paths.into_iter())
    }

    fn references(&self) -> VaultResult<Vec<PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(Path::new(REFERENCES)))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> VaultResult<Note> {
        let files = self.files.borrow();
        let raw = files
            .get(path)
            .ok_or_else(|| VaultError::io(path, io::Error::from(io::ErrorKind::NotFound)))?;
        Note::parse(path, raw)
    }

    fn write(&self, note: &Note) -> VaultResult<()> {
        let raw = note.render()?;
        self.files.borrow_mut().insert(note.path.clone(), raw);
        self.writes.borrow_mut().push(note.path.clone());
        Ok(())
    }
}
