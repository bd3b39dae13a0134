use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("cannot decode frontmatter in {}: {reason}", .path.display())]
    MetadataDecode { path: PathBuf, reason: String },

    #[error("cannot encode frontmatter for {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("invalid frontmatter in {}: no metadata block", .0.display())]
    MissingMetadata(PathBuf),

    #[error("missing `{field}` in frontmatter of {}", .path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("ID and permalink do not match in {}", .path.display())]
    IdentityMismatch { path: PathBuf },

    #[error("could not select a url in frontmatter of {}", .0.display())]
    NoUrlFound(PathBuf),

    #[error("vault not found: {}", .0.display())]
    VaultNotFound(PathBuf),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
