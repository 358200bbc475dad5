//! The reconciliation algorithms shared by every generated message type:
//! extraction (with key stamping), key listing, and translation.
//!
//! Correlation rules between `current` and `previous`:
//! - translatable fields and composite children match by field name,
//! - array elements match by index, never by content, so repeated empty or
//!   duplicate strings at different positions keep independent keys,
//! - map entries match by map key, regardless of iteration order.
//!
//! A missing `previous` at any level means "no previous value" for every
//! descendant. Instance trees are finite even for self-referential message
//! types, so there is no cycle detection.
//!
//! Empty strings carry no translatable content and are never keyed: with a
//! content-derived key policy, keying an array of empty strings would give
//! every position the same key and a later locale could no longer override
//! the positions independently. An empty text clears the field's key,
//! contributes no map entry, and is left untouched by translation.

use std::collections::HashMap;

use crate::error::ReconcileError;
use crate::keys::KeyGetter;
use crate::node::{ChildSlot, Composite, FieldSlot, FieldValue, MessageNode, TransString};

/// Flat key -> text mapping produced by extraction and consumed by
/// translation lookups.
pub type TranslationMap = HashMap<String, String>;

/// Walks `current` in plan order, asks `keys` for a key per translatable
/// string (passing the key stamped on the matching `previous` field, or
/// empty), stamps the chosen key onto `current`, and returns the flat
/// key -> text map for the whole tree.
pub fn extract(
    current: &mut MessageNode,
    previous: Option<&MessageNode>,
    keys: &dyn KeyGetter,
) -> Result<TranslationMap, ReconcileError> {
    let mut out = TranslationMap::new();
    extract_node(current, previous, keys, &mut out)?;
    Ok(out)
}

fn extract_node(
    current: &mut MessageNode,
    previous: Option<&MessageNode>,
    keys: &dyn KeyGetter,
    out: &mut TranslationMap,
) -> Result<(), ReconcileError> {
    for slot in &mut current.fields {
        let name = slot.name;
        let prev_value = previous
            .and_then(|p| p.fields.iter().find(|s| s.name == name))
            .map(|s| &s.value);

        match &mut slot.value {
            FieldValue::Single(ts) => {
                let old_key = match prev_value {
                    Some(FieldValue::Single(prev)) => prev.key.as_str(),
                    Some(FieldValue::Array(_)) => {
                        return Err(ReconcileError::ShapeMismatch { field: name })
                    }
                    None => "",
                };
                stamp(ts, old_key, keys, out);
            }
            FieldValue::Array(items) => {
                let prev_items = match prev_value {
                    Some(FieldValue::Array(prev)) => Some(prev.as_slice()),
                    Some(FieldValue::Single(_)) => {
                        return Err(ReconcileError::ShapeMismatch { field: name })
                    }
                    None => None,
                };
                for (i, ts) in items.iter_mut().enumerate() {
                    let old_key = prev_items
                        .and_then(|prev| prev.get(i))
                        .map(|prev| prev.key.as_str())
                        .unwrap_or("");
                    stamp(ts, old_key, keys, out);
                }
            }
        }
    }

    for child in &mut current.children {
        let name = child.name;
        let prev_value = previous
            .and_then(|p| p.children.iter().find(|c| c.name == name))
            .map(|c| &c.value);

        match &mut child.value {
            Composite::Absent => {}
            Composite::Single(node) => {
                let prev_node = match prev_value {
                    Some(Composite::Single(prev)) => Some(prev.as_ref()),
                    None | Some(Composite::Absent) => None,
                    Some(_) => return Err(ReconcileError::ShapeMismatch { field: name }),
                };
                extract_node(node, prev_node, keys, out)?;
            }
            Composite::Array(nodes) => {
                let prev_nodes = match prev_value {
                    Some(Composite::Array(prev)) => Some(prev.as_slice()),
                    None | Some(Composite::Absent) => None,
                    Some(_) => return Err(ReconcileError::ShapeMismatch { field: name }),
                };
                for (i, node) in nodes.iter_mut().enumerate() {
                    extract_node(node, prev_nodes.and_then(|prev| prev.get(i)), keys, out)?;
                }
            }
            Composite::Map(nodes) => {
                let prev_map = match prev_value {
                    Some(Composite::Map(prev)) => Some(prev),
                    None | Some(Composite::Absent) => None,
                    Some(_) => return Err(ReconcileError::ShapeMismatch { field: name }),
                };
                for (key, node) in nodes.iter_mut() {
                    extract_node(node, prev_map.and_then(|prev| prev.get(key)), keys, out)?;
                }
            }
        }
    }

    Ok(())
}

fn stamp(ts: &mut TransString, old_key: &str, keys: &dyn KeyGetter, out: &mut TranslationMap) {
    if ts.text.is_empty() {
        ts.key.clear();
        return;
    }
    ts.key = keys.get_key(old_key, &ts.text);
    out.insert(ts.key.clone(), ts.text.clone());
}

/// Collects the stamped key of every translatable field in extraction
/// traversal order. Only meaningful after an extraction pass has stamped
/// keys onto this tree; map children iterate in their `BTreeMap` key order,
/// which keeps the sequence stable within and across calls.
pub fn translation_keys(node: &MessageNode) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(node, &mut keys);
    keys
}

fn collect_keys(node: &MessageNode, keys: &mut Vec<String>) {
    let mut push = |ts: &TransString| {
        if !ts.key.is_empty() {
            keys.push(ts.key.clone());
        }
    };
    for slot in &node.fields {
        match &slot.value {
            FieldValue::Single(ts) => push(ts),
            FieldValue::Array(items) => items.iter().for_each(&mut push),
        }
    }
    for child in &node.children {
        match &child.value {
            Composite::Absent => {}
            Composite::Single(inner) => collect_keys(inner, keys),
            Composite::Array(inner) => {
                for node in inner {
                    collect_keys(node, keys);
                }
            }
            Composite::Map(inner) => {
                for node in inner.values() {
                    collect_keys(node, keys);
                }
            }
        }
    }
}

/// Produces a structurally isomorphic tree with every translatable string
/// replaced by `lookup` of its stamped key. A key without an entry yields
/// empty text, not an error: a missing translation is a content gap. The
/// input tree is left unmodified and keys carry over unchanged.
pub fn translate(node: &MessageNode, lookup: &dyn Fn(&str) -> Option<String>) -> MessageNode {
    MessageNode {
        fields: node
            .fields
            .iter()
            .map(|slot| FieldSlot {
                name: slot.name,
                value: match &slot.value {
                    FieldValue::Single(ts) => FieldValue::Single(apply(ts, lookup)),
                    FieldValue::Array(items) => {
                        FieldValue::Array(items.iter().map(|ts| apply(ts, lookup)).collect())
                    }
                },
            })
            .collect(),
        children: node
            .children
            .iter()
            .map(|child| ChildSlot {
                name: child.name,
                value: match &child.value {
                    Composite::Absent => Composite::Absent,
                    Composite::Single(inner) => {
                        Composite::Single(Box::new(translate(inner, lookup)))
                    }
                    Composite::Array(inner) => {
                        Composite::Array(inner.iter().map(|node| translate(node, lookup)).collect())
                    }
                    Composite::Map(inner) => Composite::Map(
                        inner
                            .iter()
                            .map(|(key, node)| (key.clone(), translate(node, lookup)))
                            .collect(),
                    ),
                },
            })
            .collect(),
    }
}

fn apply(ts: &TransString, lookup: &dyn Fn(&str) -> Option<String>) -> TransString {
    // No key means the field carried no text when keys were stamped.
    if ts.key.is_empty() {
        return ts.clone();
    }
    TransString {
        text: lookup(&ts.key).unwrap_or_default(),
        key: ts.key.clone(),
    }
}
