//! Render tree materialization.
//!
//! Converts a document into UI-facing nodes carrying display heuristics:
//! leaf mappings collapse into inline field lists, container nodes carry a
//! transitive descendant count used as a size badge, and a handful of
//! well-known keys supply a human label.

use crate::types::RenderNode;
use serde_yaml::{Mapping, Value};

/// Keys tried in order when picking a display label.
const LABEL_KEYS: [&str; 6] = ["name", "provider", "title", "label", "id", "key"];

/// Closed classification of a document value, evaluated once per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Null, boolean, number or string.
    Scalar,
    /// Sequence whose every element is a scalar.
    ScalarSequence,
    /// Mapping whose every value is a scalar or a scalar sequence.
    LeafMapping,
    /// Anything holding nested containers.
    Container,
}

pub fn classify(value: &Value) -> Shape {
    match value {
        Value::Sequence(seq) => {
            if seq.iter().all(is_scalar) {
                Shape::ScalarSequence
            } else {
                Shape::Container
            }
        }
        Value::Mapping(map) => {
            let flat = map.values().all(|v| {
                is_scalar(v) || matches!(classify(v), Shape::ScalarSequence)
            });
            if flat {
                Shape::LeafMapping
            } else {
                Shape::Container
            }
        }
        Value::Tagged(tagged) => classify(&tagged.value),
        _ => Shape::Scalar,
    }
}

fn is_scalar(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
        Value::Tagged(tagged) => is_scalar(&tagged.value),
        _ => false,
    }
}

/// Textual form of a scalar, used for labels.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => String::new(),
    }
}

/// Textual form of a mapping key.
pub fn key_text(key: &Value) -> String {
    scalar_text(key)
}

/// Total transitive descendant count: every nested key and array element
/// contributes `1 + count(value)`.
pub fn count_items(value: &Value) -> usize {
    match value {
        Value::Sequence(seq) => seq.iter().map(|v| 1 + count_items(v)).sum(),
        Value::Mapping(map) => map.values().map(|v| 1 + count_items(v)).sum(),
        Value::Tagged(tagged) => count_items(&tagged.value),
        _ => 0,
    }
}

/// First label key whose value is scalar, rendered as text.
fn find_label(map: &Mapping) -> Option<String> {
    for key in LABEL_KEYS {
        if let Some(value) = map.get(Value::String(key.to_string())) {
            if is_scalar(value) {
                return Some(scalar_text(value));
            }
        }
    }
    None
}

/// Materialize the top level of a document into render nodes.
pub fn materialize(parsed: &Value) -> Vec<RenderNode> {
    match parsed {
        Value::Null => vec![RenderNode::bare("(empty)".to_string(), Value::Null)],
        Value::Sequence(seq) => seq
            .iter()
            .enumerate()
            .map(|(i, item)| build_node(i.to_string(), item, Some(i)))
            .collect(),
        Value::Mapping(map) => map
            .iter()
            .map(|(k, v)| build_node(key_text(k), v, None))
            .collect(),
        scalar => vec![RenderNode::bare("(root)".to_string(), scalar.clone())],
    }
}

fn build_node(key: String, value: &Value, array_index: Option<usize>) -> RenderNode {
    let mut node = RenderNode::bare(key, value.clone());
    node.array_index = array_index;

    match value {
        Value::Mapping(map) => {
            if classify(value) == Shape::LeafMapping {
                // Leaf object: rendered inline, never expanded into children
                node.is_leaf = true;
                node.label = find_label(map);
                node.fields = Some(map.clone());
            } else {
                node.label = find_label(map);
                node.children = Some(
                    map.iter()
                        .map(|(k, v)| build_node(key_text(k), v, None))
                        .collect(),
                );
                node.child_count = Some(count_items(value));
            }
        }
        Value::Sequence(seq) => {
            node.children = Some(
                seq.iter()
                    .enumerate()
                    .map(|(i, item)| build_node(i.to_string(), item, Some(i)))
                    .collect(),
            );
            node.child_count = Some(count_items(value));
        }
        _ => {}
    }

    node
}
