pub mod error;
pub mod frontmatter;
pub mod metadata;
pub mod note;
pub mod permalink;
pub mod publish;
pub mod store;
pub mod url_extract;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{VaultError, VaultResult};
pub use metadata::{MetaValue, Metadata};
pub use note::Note;
pub use permalink::{add_permalinks, IdentityFix, PermalinkChange, PermalinkSummary};
pub use publish::list_publish_tagged;
pub use store::NoteStore;
pub use url_extract::{extract_frontmatter_urls, Extraction};
pub use validate::{validate_files, validate_references, ReferenceIssue, ReferenceProblem};
