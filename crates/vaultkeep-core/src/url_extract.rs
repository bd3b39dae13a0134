//! Lift a reference note's URL out of its frontmatter into a tagged link at
//! the top of the body.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::metadata::{MetaValue, Metadata, PAGE_TITLE};
use crate::note::Note;
use crate::store::NoteStore;

/// Tag written in front of the extracted link. Its presence anywhere in the
/// body marks a note as already processed.
pub const MARKER: &str = "#python_obsidian/url_extraction";

static URL_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^url.*").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Rewritten {
        path: PathBuf,
        name: String,
        url: String,
    },
    /// Already tagged; `line` is the body line carrying the marker.
    Skipped { path: PathBuf, line: String },
}

/// First body line containing [`MARKER`].
pub fn marker_line(body: &str) -> Option<&str> {
    body.lines().find(|line| line.contains(MARKER))
}

/// Value of the first `url*` key, in insertion order, holding a usable URL.
/// Keys whose value is null, empty or a mapping are passed over.
pub fn first_url(metadata: &Metadata) -> Option<String> {
    metadata
        .entries()
        .filter(|(key, _)| URL_KEY_RE.is_match(key))
        .find_map(|(_, value)| {
            let value = MetaValue::from_yaml(value)?;
            value
                .first()
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        })
}

pub fn tag_line(name: &str, url: &str) -> String {
    format!("{MARKER} [{name}]({url})")
}

/// Prepend the tagged link to `note`'s body. Returns `(name, url)`.
pub fn tag_note(note: &mut Note) -> VaultResult<(String, String)> {
    let url = note
        .metadata
        .as_ref()
        .and_then(first_url)
        .ok_or_else(|| VaultError::NoUrlFound(note.path.clone()))?;
    let name = note
        .metadata
        .as_ref()
        .and_then(|meta| meta.value(PAGE_TITLE))
        .and_then(|title| title.as_scalar().map(str::to_string))
        .unwrap_or_else(|| note.file_name());

    note.body = format!("{}\n\n{}", tag_line(&name, &url), note.body);
    Ok((name, url))
}

/// Tag every reference note that is not tagged yet. A reference without a
/// usable `url*` value aborts the run with [`VaultError::NoUrlFound`]; notes
/// handled before it stay rewritten.
pub fn extract_frontmatter_urls<S, F>(store: &S, mut report: F) -> VaultResult<usize>
where
    S: NoteStore + ?Sized,
    F: FnMut(&Extraction),
{
    let mut rewritten = 0;
    for path in store.references()? {
        let mut note = store.read(&path)?;
        if let Some(line) = marker_line(&note.body) {
            debug!(path = %path.display(), "already tagged");
            report(&Extraction::Skipped {
                path,
                line: line.to_string(),
            });
            continue;
        }

        let (name, url) = tag_note(&mut note)?;
        store.write(&note)?;
        rewritten += 1;
        report(&Extraction::Rewritten { path, name, url });
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;
    use crate::testing::MemoryVault;
    use std::path::Path;

    fn meta(yaml: &str) -> Metadata {
        frontmatter::decode(yaml).unwrap().unwrap()
    }

    #[test]
    fn test_first_url_in_insertion_order() {
        let m = meta("title: x\nurl_archive: http://b.test\nurl: http://a.test\n");
        assert_eq!(first_url(&m).as_deref(), Some("http://b.test"));
    }

    #[test]
    fn test_first_url_is_case_sensitive_prefix() {
        let m = meta("URL: http://upper.test\nsource-url: http://suffix.test\n");
        assert_eq!(first_url(&m), None);

        let m = meta("urls:\n  - http://one.test\n  - http://two.test\n");
        assert_eq!(first_url(&m).as_deref(), Some("http://one.test"));
    }

    #[test]
    fn test_first_url_skips_unusable_values() {
        let m = meta("url:\nurl-archive: http://r.test\n");
        assert_eq!(first_url(&m).as_deref(), Some("http://r.test"));

        let m = meta("url: ''\nurl_nested:\n  href: x\nurls: []\nurl-last: http://z.test\n");
        assert_eq!(first_url(&m).as_deref(), Some("http://z.test"));

        let m = meta("url:\nurl-archive: ''\n");
        assert_eq!(first_url(&m), None);
    }

    #[test]
    fn test_tag_note_falls_back_to_file_name() {
        let mut note = Note::parse(
            Path::new("references/Some Article.md"),
            "---\nurl: http://x.test\n---\nBody\n",
        )
        .unwrap();
        let (name, url) = tag_note(&mut note).unwrap();
        assert_eq!(name, "Some Article.md");
        assert_eq!(url, "http://x.test");
        assert_eq!(
            note.body,
            "#python_obsidian/url_extraction [Some Article.md](http://x.test)\n\nBody\n"
        );
    }

    #[test]
    fn test_extract_rewrites_and_then_skips() {
        let vault = MemoryVault::new().with(
            "references/foo.md",
            "---\npage-title: Foo\nurl: http://x.test\n---\nHello",
        );

        let mut events = Vec::new();
        let count = extract_frontmatter_urls(&vault, |e| events.push(e.clone())).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            vault.raw("references/foo.md"),
            "---\npage-title: Foo\nurl: http://x.test\n---\n\
             #python_obsidian/url_extraction [Foo](http://x.test)\n\nHello"
        );
        assert!(matches!(&events[0], Extraction::Rewritten { name, .. } if name == "Foo"));

        events.clear();
        let count = extract_frontmatter_urls(&vault, |e| events.push(e.clone())).unwrap();
        assert_eq!(count, 0);
        assert_eq!(vault.write_count(), 1);
        assert!(matches!(
            &events[0],
            Extraction::Skipped { line, .. } if line == "#python_obsidian/url_extraction [Foo](http://x.test)"
        ));
    }

    #[test]
    fn test_extract_only_touches_references() {
        let vault = MemoryVault::new()
            .with("notes/n.md", "---\nurl: http://n.test\n---\n")
            .with("references/deep/r.md", "---\nurl: http://r.test\n---\n");
        assert_eq!(extract_frontmatter_urls(&vault, |_| {}).unwrap(), 0);
        assert_eq!(vault.write_count(), 0);
    }

    #[test]
    fn test_extract_missing_url_aborts() {
        let vault = MemoryVault::new()
            .with("references/a.md", "---\nurl: http://a.test\n---\n")
            .with("references/b.md", "---\npage-title: B\n---\n")
            .with("references/c.md", "---\nurl: http://c.test\n---\n");

        let err = extract_frontmatter_urls(&vault, |_| {}).unwrap_err();
        assert!(matches!(err, VaultError::NoUrlFound(p) if p == Path::new("references/b.md")));
        assert!(vault.raw("references/a.md").contains(MARKER));
        assert!(!vault.raw("references/c.md").contains(MARKER));
    }

    #[test]
    fn test_extract_uses_later_url_key() {
        let vault = MemoryVault::new().with(
            "references/r.md",
            "---\npage-title: R\nurl:\nurl-archive: http://r.test\n---\nBody",
        );
        let mut events = Vec::new();
        assert_eq!(extract_frontmatter_urls(&vault, |e| events.push(e.clone())).unwrap(), 1);
        assert!(matches!(&events[0], Extraction::Rewritten { url, .. } if url == "http://r.test"));
        assert!(vault
            .raw("references/r.md")
            .ends_with("#python_obsidian/url_extraction [R](http://r.test)\n\nBody"));
    }

    #[test]
    fn test_extract_without_metadata_fails() {
        let vault = MemoryVault::new().with("references/plain.md", "text only\n");
        assert!(matches!(
            extract_frontmatter_urls(&vault, |_| {}),
            Err(VaultError::NoUrlFound(_))
        ));
    }
}
