use std::collections::BTreeMap;

/// A translatable string together with the translation key stamped on it by
/// the last extraction pass. The key, not the text, is the handle used to
/// look up replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransString {
    pub text: String,
    pub key: String,
}

impl TransString {
    pub fn new(text: impl Into<String>) -> Self {
        TransString {
            text: text.into(),
            key: String::new(),
        }
    }
}

impl From<&str> for TransString {
    fn from(text: &str) -> Self {
        TransString::new(text)
    }
}

impl From<String> for TransString {
    fn from(text: String) -> Self {
        TransString::new(text)
    }
}

/// Value of one translatable field: a single string or a repeated string
/// field whose elements are keyed independently by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(TransString),
    Array(Vec<TransString>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub name: &'static str,
    pub value: FieldValue,
}

/// A composite child of a message node. The variant is dictated by the
/// message type's plan (singular, array, or map field), not discovered at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composite {
    Absent,
    Single(Box<MessageNode>),
    Array(Vec<MessageNode>),
    Map(BTreeMap<String, MessageNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSlot {
    pub name: &'static str,
    pub value: Composite,
}

/// Instance-level view of one message: its translatable fields followed by
/// its composite children, both in plan (declaration) order. Built fresh
/// from a live instance for each engine call; the engine reads it and, for
/// extraction, stamps keys into it, but never owns instance storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageNode {
    pub fields: Vec<FieldSlot>,
    pub children: Vec<ChildSlot>,
}

impl MessageNode {
    pub fn new() -> Self {
        MessageNode::default()
    }

    pub fn field(mut self, name: &'static str, value: impl Into<TransString>) -> Self {
        self.fields.push(FieldSlot {
            name,
            value: FieldValue::Single(value.into()),
        });
        self
    }

    pub fn field_array(mut self, name: &'static str, values: Vec<TransString>) -> Self {
        self.fields.push(FieldSlot {
            name,
            value: FieldValue::Array(values),
        });
        self
    }

    pub fn child(mut self, name: &'static str, value: Composite) -> Self {
        self.children.push(ChildSlot { name, value });
        self
    }

    pub fn single(&self, name: &str) -> Option<&TransString> {
        self.fields.iter().find_map(|slot| match &slot.value {
            FieldValue::Single(ts) if slot.name == name => Some(ts),
            _ => None,
        })
    }

    pub fn array(&self, name: &str) -> Option<&[TransString]> {
        self.fields.iter().find_map(|slot| match &slot.value {
            FieldValue::Array(items) if slot.name == name => Some(items.as_slice()),
            _ => None,
        })
    }

    pub fn composite(&self, name: &str) -> Option<&Composite> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .map(|child| &child.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_declaration_order() {
        let node = MessageNode::new()
            .field("title", "book")
            .field_array("tags", vec!["one".into(), "two".into()])
            .child("intro", Composite::Absent);

        assert_eq!(node.fields[0].name, "title");
        assert_eq!(node.fields[1].name, "tags");
        assert_eq!(node.single("title").unwrap().text, "book");
        assert_eq!(node.array("tags").unwrap().len(), 2);
        assert_eq!(node.composite("intro"), Some(&Composite::Absent));
        assert!(node.single("tags").is_none());
    }
}
