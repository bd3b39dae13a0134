//! Frontmatter codec: split a note into its YAML block and body, and put
//! them back together.
//!
//! A block opens when the first line starts with `---` and closes at the
//! next line starting with `---`. Everything after the closing line is body,
//! byte for byte, including later `---` lines (horizontal rules and the like).
//!
//! When a decoded block only gains entries, [`render_preserving`] writes the
//! original block text back and encodes just the new entries, so values the
//! YAML encoder would reformat (oversized integers, comments, quoting) survive.

use serde_yaml::Value;
use thiserror::Error;

use crate::metadata::Metadata;

pub const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("frontmatter is not a YAML mapping (found {0})")]
    NotAMapping(&'static str),
}

/// Split raw text into `(block, body)`.
///
/// `block` is `None` when the text does not open with a delimiter line. An
/// unterminated block swallows the rest of the file and leaves the body empty.
pub fn split(raw: &str) -> (Option<&str>, &str) {
    let mut lines = raw.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) if line.starts_with(DELIMITER) => line,
        _ => return (None, raw),
    };

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.starts_with(DELIMITER) {
            return (Some(&raw[block_start..offset]), &raw[offset + line.len()..]);
        }
        offset += line.len();
    }
    (Some(&raw[block_start..]), "")
}

/// Decode a block's YAML text. Blank blocks and YAML null decode to `None`.
pub fn decode(block: &str) -> Result<Option<Metadata>, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(None);
    }
    match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(mapping) => Ok(Some(Metadata::from_mapping(mapping))),
        Value::Null => Ok(None),
        other => Err(FrontmatterError::NotAMapping(kind_name(&other))),
    }
}

/// A decoded block together with the text it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub text: String,
    pub metadata: Metadata,
}

/// Parse raw note text into `(source, body)`. `source` is `None` whenever
/// the metadata is absent.
pub fn parse_source(raw: &str) -> Result<(Option<Source>, String), FrontmatterError> {
    let (block, body) = split(raw);
    let source = match block {
        Some(text) => decode(text)?.map(|metadata| Source {
            text: text.to_string(),
            metadata,
        }),
        None => None,
    };
    Ok((source, body.to_string()))
}

/// Parse raw note text into `(metadata, body)`.
pub fn parse(raw: &str) -> Result<(Option<Metadata>, String), FrontmatterError> {
    let (source, body) = parse_source(raw)?;
    Ok((source.map(|s| s.metadata), body))
}

/// Inverse of [`parse`]. Absent metadata emits the body alone.
pub fn render(metadata: Option<&Metadata>, body: &str) -> Result<String, FrontmatterError> {
    match metadata {
        Some(meta) => {
            let yaml = meta.encode()?;
            Ok(format!(
                "{DELIMITER}\n{}\n{DELIMITER}\n{body}",
                yaml.trim_end_matches('\n')
            ))
        }
        None => Ok(body.to_string()),
    }
}

/// Like [`render`], but reuses `source`'s text when `metadata` is the source
/// mapping with entries appended. Any other change is a full [`render`].
pub fn render_preserving(
    metadata: Option<&Metadata>,
    source: Option<&Source>,
    body: &str,
) -> Result<String, FrontmatterError> {
    if let (Some(meta), Some(source)) = (metadata, source) {
        if let Some(text) = splice(meta, source)? {
            return Ok(format!("{DELIMITER}\n{text}\n{DELIMITER}\n{body}"));
        }
    }
    render(metadata, body)
}

/// Source text plus the encoded appended entries, if that text still decodes
/// to exactly `meta`. Flow-style blocks and trailing block scalars fail the
/// check.
fn splice(meta: &Metadata, source: &Source) -> Result<Option<String>, FrontmatterError> {
    let Some(appended) = meta.appended_since(&source.metadata) else {
        return Ok(None);
    };
    let mut text = source.text.trim_end_matches(['\r', '\n']).to_string();
    if !appended.is_empty() {
        text.push('\n');
        text.push_str(appended.encode()?.trim_end_matches('\n'));
    }
    let verified = matches!(decode(&text), Ok(Some(decoded)) if &decoded == meta);
    Ok(verified.then_some(text))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
