use std::fmt;

use serde_yaml::{Mapping, Value};

pub const ID: &str = "id";
pub const PERMALINK: &str = "permalink";
pub const PAGE_TITLE: &str = "page-title";
pub const URL: &str = "url";
pub const PUBLISH: &str = "publish";

/// Ordered frontmatter mapping.
///
/// Keys keep the order they were decoded or inserted in, and values the tool
/// never touches are re-encoded exactly as they were decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(Mapping);

impl Metadata {
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        Self(mapping)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Raw decoded value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Boundary view of `key`, if its value has one.
    pub fn value(&self, key: &str) -> Option<MetaValue> {
        self.get(key).and_then(MetaValue::from_yaml)
    }

    /// Insert or replace `key`. New keys are appended after existing ones;
    /// replacing keeps the key's position.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(Value::String(key.to_string()), value)
    }

    pub fn insert_str(&mut self, key: &str, value: impl Into<String>) -> Option<Value> {
        self.insert(key, Value::String(value.into()))
    }

    /// String-keyed entries in insertion order. Non-string keys are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|key| (key, v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(k, _)| k)
    }

    /// Entries added after `earlier`'s, provided `earlier` is an unchanged
    /// prefix of `self` (same keys, same values, same order).
    pub fn appended_since(&self, earlier: &Metadata) -> Option<Metadata> {
        if earlier.len() > self.len() {
            return None;
        }
        let unchanged = self.0.iter().zip(earlier.0.iter()).all(|(a, b)| a == b);
        unchanged.then(|| {
            Self(
                self.0
                    .iter()
                    .skip(earlier.len())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        })
    }

    /// Encode as a YAML document. The result ends with a newline.
    pub fn encode(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }
}

impl From<Mapping> for Metadata {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Closed view of a metadata value: a scalar or a flat list of scalars.
///
/// Booleans and numbers are carried as their YAML text form; nulls, nested
/// mappings and tagged values have no view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl MetaValue {
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map(Self::Sequence),
            other => scalar_text(other).map(Self::Scalar),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Sequence(_) => None,
        }
    }

    /// The scalar itself, or the first element of a sequence.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Sequence(items) => items.first().map(String::as_str),
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Sequence(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
