// Code generated by glotc from schema/listing.glot. DO NOT EDIT.
// package: demo

use glot_runtime::{reconcile, Composite, KeyGetter, MessageNode, ReconcileError, TranslationMap};
use super::*;

impl ListingSection {
    /// Pulls this message's translatable strings into a flat key -> text
    /// map, stamping each field with the key chosen by `keys`.
    pub fn extract_translations(
        &mut self,
        previous: Option<&Self>,
        keys: &dyn KeyGetter,
    ) -> Result<TranslationMap, ReconcileError> {
        let mut node = self.to_trans_node();
        let previous = previous.map(|message| message.to_trans_node());
        let translations = reconcile::extract(&mut node, previous.as_ref(), keys)?;
        self.absorb_keys(&node);
        Ok(translations)
    }

    /// Lists the stamped keys needed to translate this message into any locale.
    pub fn get_translation_keys(&self) -> Vec<String> {
        reconcile::translation_keys(&self.to_trans_node())
    }

    /// Replaces this message's translatable strings with `lookup` of their
    /// stamped keys; a key without a translation leaves an empty string.
    pub fn translate(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        let node = reconcile::translate(&self.to_trans_node(), lookup);
        self.absorb_text(&node);
    }

    fn to_trans_node(&self) -> MessageNode {
        MessageNode::new()
            .field("heading", self.heading.clone())
    }

    fn absorb_keys(&mut self, node: &MessageNode) {
        if let Some(value) = node.single("heading") {
            self.heading.key = value.key.clone();
        }
    }

    fn absorb_text(&mut self, node: &MessageNode) {
        if let Some(value) = node.single("heading") {
            self.heading.text = value.text.clone();
        }
    }
}

impl Listing {
    /// Pulls this message's translatable strings into a flat key -> text
    /// map, stamping each field with the key chosen by `keys`.
    pub fn extract_translations(
        &mut self,
        previous: Option<&Self>,
        keys: &dyn KeyGetter,
    ) -> Result<TranslationMap, ReconcileError> {
        let mut node = self.to_trans_node();
        let previous = previous.map(|message| message.to_trans_node());
        let translations = reconcile::extract(&mut node, previous.as_ref(), keys)?;
        self.absorb_keys(&node);
        Ok(translations)
    }

    /// Lists the stamped keys needed to translate this message into any locale.
    pub fn get_translation_keys(&self) -> Vec<String> {
        reconcile::translation_keys(&self.to_trans_node())
    }

    /// Replaces this message's translatable strings with `lookup` of their
    /// stamped keys; a key without a translation leaves an empty string.
    pub fn translate(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        let node = reconcile::translate(&self.to_trans_node(), lookup);
        self.absorb_text(&node);
    }

    fn to_trans_node(&self) -> MessageNode {
        MessageNode::new()
            .field("title", self.title.clone())
            .field_array("tags", self.tags.clone())
            .child("intro", match &self.intro {
                Some(child) => Composite::Single(Box::new(child.to_trans_node())),
                None => Composite::Absent,
            })
            .child("sections", Composite::Array(self.sections.iter().map(|child| child.to_trans_node()).collect()))
            .child("extras", Composite::Map(self.extras.iter().map(|(key, child)| (key.clone(), child.to_trans_node())).collect()))
    }

    fn absorb_keys(&mut self, node: &MessageNode) {
        if let Some(value) = node.single("title") {
            self.title.key = value.key.clone();
        }
        if let Some(values) = node.array("tags") {
            for (field, value) in self.tags.iter_mut().zip(values) {
                field.key = value.key.clone();
            }
        }
        if let Some(Composite::Single(child)) = node.composite("intro") {
            if let Some(field) = self.intro.as_mut() {
                field.absorb_keys(child);
            }
        }
        if let Some(Composite::Array(children)) = node.composite("sections") {
            for (field, child) in self.sections.iter_mut().zip(children) {
                field.absorb_keys(child);
            }
        }
        if let Some(Composite::Map(children)) = node.composite("extras") {
            for (key, field) in self.extras.iter_mut() {
                if let Some(child) = children.get(key) {
                    field.absorb_keys(child);
                }
            }
        }
    }

    fn absorb_text(&mut self, node: &MessageNode) {
        if let Some(value) = node.single("title") {
            self.title.text = value.text.clone();
        }
        if let Some(values) = node.array("tags") {
            for (field, value) in self.tags.iter_mut().zip(values) {
                field.text = value.text.clone();
            }
        }
        if let Some(Composite::Single(child)) = node.composite("intro") {
            if let Some(field) = self.intro.as_mut() {
                field.absorb_text(child);
            }
        }
        if let Some(Composite::Array(children)) = node.composite("sections") {
            for (field, child) in self.sections.iter_mut().zip(children) {
                field.absorb_text(child);
            }
        }
        if let Some(Composite::Map(children)) = node.composite("extras") {
            for (key, field) in self.extras.iter_mut() {
                if let Some(child) = children.get(key) {
                    field.absorb_text(child);
                }
            }
        }
    }
}
