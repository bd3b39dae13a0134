//! Read-only checks.
//!
//! Reference validation is lenient: every failing reference is reported and
//! the scan continues. Whole-vault validation is strict: the first note
//! without a matching `id`/`permalink` pair ends the run with an error.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::metadata::{Metadata, ID, PAGE_TITLE, PERMALINK, URL};
use crate::note::Note;
use crate::store::NoteStore;

/// Keys every reference note must carry.
const REFERENCE_FIELDS: [&str; 2] = [PAGE_TITLE, URL];

#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceProblem {
    NoMetadata,
    MissingFields(Vec<&'static str>),
}

/// A reference note that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceIssue {
    pub path: PathBuf,
    pub metadata: Option<Metadata>,
    pub problem: ReferenceProblem,
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid frontmatter in {}: ", self.path.display())?;
        match &self.problem {
            ReferenceProblem::NoMetadata => write!(f, "no frontmatter block"),
            ReferenceProblem::MissingFields(fields) => write!(f, "missing {}", fields.join(", ")),
        }
    }
}

/// Check a single reference note.
pub fn check_reference(note: &Note) -> Option<ReferenceIssue> {
    let problem = match &note.metadata {
        None => ReferenceProblem::NoMetadata,
        Some(meta) => {
            let missing: Vec<&'static str> = REFERENCE_FIELDS
                .into_iter()
                .filter(|field| !meta.contains_key(field))
                .collect();
            if missing.is_empty() {
                return None;
            }
            ReferenceProblem::MissingFields(missing)
        }
    };
    Some(ReferenceIssue {
        path: note.path.clone(),
        metadata: note.metadata.clone(),
        problem,
    })
}

/// Hand every reference note missing `page-title` or `url` to `report` as it
/// is found. Returns the number of issues reported.
pub fn validate_references<S, F>(store: &S, mut report: F) -> VaultResult<usize>
where
    S: NoteStore + ?Sized,
    F: FnMut(&ReferenceIssue),
{
    let mut reported = 0;
    for path in store.references()? {
        let note = store.read(&path)?;
        match check_reference(&note) {
            Some(issue) => {
                report(&issue);
                reported += 1;
            }
            None => debug!(path = %path.display(), "reference ok"),
        }
    }
    Ok(reported)
}

/// Strict identity check: metadata present, `id` and `permalink` present
/// and equal.
pub fn check_identity(note: &Note) -> VaultResult<()> {
    let meta = note
        .metadata
        .as_ref()
        .ok_or_else(|| VaultError::MissingMetadata(note.path.clone()))?;

    let field = |key: &str| {
        meta.get(key).ok_or_else(|| VaultError::MissingField {
            path: note.path.clone(),
            field: key.to_string(),
        })
    };
    let id = field(ID)?;
    let permalink = field(PERMALINK)?;

    if id != permalink {
        return Err(VaultError::IdentityMismatch {
            path: note.path.clone(),
        });
    }
    Ok(())
}

/// Validate references, handing each issue to `report`, then run the strict
/// identity check over every note. Returns the number of notes checked.
pub fn validate_files<S, F>(store: &S, mut report: F) -> VaultResult<usize>
where
    S: NoteStore + ?Sized,
    F: FnMut(&ReferenceIssue),
{
    validate_references(store, &mut report)?;

    let mut checked = 0;
    for path in store.notes() {
        let note = store.read(&path)?;
        check_identity(&note)?;
        checked += 1;
    }
    Ok(checked)
}
