use crate::error::StrataResult;
use crate::tree::materialize;
use crate::types::RenderNode;
use serde_yaml::Value;
use std::path::Path;

/// Parse YAML document text into a document value.
pub fn parse_str(text: &str) -> StrataResult<Value> {
    // An all-whitespace buffer is an empty document, not an error
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Parse a YAML document from a file.
pub fn parse_file(path: &Path) -> StrataResult<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

/// Result of turning editor text into a render tree.
///
/// Exactly one of `tree` and `error` is populated; "no tree + error present"
/// is the canonical error state and the materializer is skipped entirely for
/// malformed text.
#[derive(Debug)]
pub struct DocumentState {
    pub document: Option<Value>,
    pub tree: Option<Vec<RenderNode>>,
    pub error: Option<String>,
}

impl DocumentState {
    pub fn from_text(text: &str) -> Self {
        match parse_str(text) {
            Ok(document) => {
                let tree = materialize(&document);
                Self {
                    document: Some(document),
                    tree: Some(tree),
                    error: None,
                }
            }
            Err(err) => Self {
                document: None,
                tree: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_key_order() {
        let doc = parse_str("z: 1\na: 2\nm: 3\n").unwrap();
        let Value::Mapping(map) = doc else { panic!("expected mapping") };
        let keys: Vec<String> = map.keys().map(crate::tree::key_text).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_blank_text_is_empty_document() {
        assert_eq!(parse_str("   \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_malformed_text_yields_error_state() {
        let state = DocumentState::from_text("a: [unclosed");
        assert!(state.is_error());
        assert!(state.tree.is_none());
        assert!(state.document.is_none());
        assert!(!state.error.unwrap().is_empty());
    }

    #[test]
    fn test_valid_text_yields_tree_without_error() {
        let state = DocumentState::from_text("x: 5\n");
        assert!(!state.is_error());
        let tree = state.tree.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].key, "x");
    }
}
