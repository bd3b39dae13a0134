use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};
use crate::frontmatter::{self, Source};
use crate::metadata::Metadata;

/// A note file split into its frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub path: PathBuf,
    pub metadata: Option<Metadata>,
    pub body: String,
    /// Block as read from disk, reused on render where possible.
    source: Option<Source>,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, metadata: Option<Metadata>, body: String) -> Self {
        Self {
            path: path.into(),
            metadata,
            body,
            source: None,
        }
    }

    /// Parse the raw contents of the file at `path`.
    pub fn parse(path: &Path, raw: &str) -> VaultResult<Self> {
        let (source, body) =
            frontmatter::parse_source(raw).map_err(|e| VaultError::MetadataDecode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            metadata: source.as_ref().map(|s| s.metadata.clone()),
            body,
            source,
        })
    }

    /// Raw file contents for this note. Frontmatter text read from disk is
    /// kept as is when the metadata only gained entries.
    pub fn render(&self) -> VaultResult<String> {
        frontmatter::render_preserving(self.metadata.as_ref(), self.source.as_ref(), &self.body)
            .map_err(|e| VaultError::Encode {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// File name component, or the whole path when there is none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn has(&self, key: &str) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|meta| meta.contains_key(key))
    }
}
