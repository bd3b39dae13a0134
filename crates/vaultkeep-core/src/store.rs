use std::path::{Path, PathBuf};

use crate::error::VaultResult;
use crate::note::Note;

pub trait NoteStore {
    // Enumeration
    fn notes(&self) -> Box<dyn Iterator<Item = PathBuf> + '_>;
    fn references(&self) -> VaultResult<Vec<PathBuf>>;

    // IO
    fn read(&self, path: &Path) -> VaultResult<Note>;
    fn write(&self, note: &Note) -> VaultResult<()>;
}
