use std::path::PathBuf;

use serde_yaml::Value;

use crate::error::VaultResult;
use crate::metadata::{Metadata, PUBLISH};
use crate::store::NoteStore;

/// `publish` must hold the YAML string `"true"`. A native boolean does not
/// count.
pub fn is_publish_tagged(metadata: &Metadata) -> bool {
    matches!(metadata.get(PUBLISH), Some(Value::String(s)) if s == "true")
}

/// Vault notes tagged for publishing, in enumeration order.
pub fn list_publish_tagged<S: NoteStore + ?Sized>(store: &S) -> VaultResult<Vec<PathBuf>> {
    let mut tagged = Vec::new();
    for path in store.notes() {
        let note = store.read(&path)?;
        if note.metadata.as_ref().is_some_and(is_publish_tagged) {
            tagged.push(path);
        }
    }
    Ok(tagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryVault;

    #[test]
    fn test_only_string_true_matches() {
        let vault = MemoryVault::new()
            .with("quoted.md", "---\npublish: 'true'\n---\n")
            .with("double.md", "---\npublish: \"true\"\n---\n")
            .with("bool.md", "---\npublish: true\n---\n")
            .with("false.md", "---\npublish: 'false'\n---\n")
            .with("none.md", "no metadata\n");

        let tagged = list_publish_tagged(&vault).unwrap();
        assert_eq!(
            tagged,
            vec![PathBuf::from("double.md"), PathBuf::from("quoted.md")]
        );
    }
}
