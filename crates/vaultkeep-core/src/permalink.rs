//! Identity injection: make every note carry matching `id` and `permalink`.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

use crate::error::VaultResult;
use crate::metadata::{Metadata, ID, PERMALINK};
use crate::store::NoteStore;

/// How a note's identity was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFix {
    PermalinkFromId,
    IdFromPermalink,
    Generated,
}

impl fmt::Display for IdentityFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermalinkFromId => write!(f, "permalink from id"),
            Self::IdFromPermalink => write!(f, "id from permalink"),
            Self::Generated => write!(f, "generated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PermalinkChange {
    pub path: PathBuf,
    pub fix: IdentityFix,
    /// The identifier now held by both keys.
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermalinkSummary {
    pub checked: usize,
    pub updated: usize,
}

/// Fill in whichever of `id`/`permalink` is missing. Returns `None` when both
/// are already present and nothing changed.
///
/// `generate` is only called when neither key exists; absent metadata gets an
/// empty mapping first.
pub fn assign_identity<G>(metadata: &mut Option<Metadata>, generate: G) -> Option<IdentityFix>
where
    G: FnOnce() -> String,
{
    let meta = metadata.get_or_insert_with(Metadata::new);
    match (meta.get(ID).cloned(), meta.get(PERMALINK).cloned()) {
        (Some(_), Some(_)) => None,
        (Some(id), None) => {
            meta.insert(PERMALINK, id);
            Some(IdentityFix::PermalinkFromId)
        }
        (None, Some(permalink)) => {
            meta.insert(ID, permalink);
            Some(IdentityFix::IdFromPermalink)
        }
        (None, None) => {
            let fresh = generate();
            meta.insert_str(ID, fresh.clone());
            meta.insert_str(PERMALINK, fresh);
            Some(IdentityFix::Generated)
        }
    }
}

/// Add `id`/`permalink` to every note lacking them and rewrite it. Notes that
/// already carry both are left untouched on disk.
pub fn add_permalinks<S, F>(store: &S, mut report: F) -> VaultResult<PermalinkSummary>
where
    S: NoteStore + ?Sized,
    F: FnMut(&PermalinkChange),
{
    let mut summary = PermalinkSummary::default();
    for path in store.notes() {
        summary.checked += 1;
        let mut note = store.read(&path)?;
        if note.has(ID) && note.has(PERMALINK) {
            debug!(path = %path.display(), "identity complete");
            continue;
        }

        let Some(fix) = assign_identity(&mut note.metadata, || Uuid::new_v4().to_string()) else {
            continue;
        };
        store.write(&note)?;
        summary.updated += 1;

        let value = note
            .metadata
            .as_ref()
            .and_then(|meta| meta.value(ID))
            .map(|v| v.to_string())
            .unwrap_or_default();
        report(&PermalinkChange { path, fix, value });
    }
    Ok(summary)
}
