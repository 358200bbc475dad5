//! Generates the per-message translation impls. The generated file is meant
//! to sit next to hand-maintained message structs and is included as a
//! sibling module (`use super::*;` brings the structs into scope). The
//! contract with those structs: translated fields are `TransString` /
//! `Vec<TransString>`, composite fields are `Option<T>` / `Vec<T>` /
//! `BTreeMap<String, T>`.

use crate::{
    classify::ClassifiedField,
    error::GlotError,
    index::TypeIndex,
    plan::{build_plans, MessagePlan},
    types::{SchemaFile, TypeDef},
    utils::{escape_rust_keyword, to_snake_case},
    verifier::dotted_package,
};
use std::collections::BTreeMap;

/// One named, textual output artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub name:    String,
    pub content: String,
}

/// Output artifact name: the schema file's extension replaced by the
/// generated-code suffix.
pub fn output_name(input: &str) -> String {
    let stem = input.strip_suffix(".glot").unwrap_or(input);
    format!("{}_trans.rs", stem)
}

/// Plans the whole schema set once, then renders one `_trans.rs` artifact
/// per schema file. Behind-the-scenes well-known schemas produce no output.
pub fn generate_files(files: &[SchemaFile]) -> Result<Vec<GeneratedFile>, GlotError> {
    let index = TypeIndex::build(files);
    let plans = build_plans(files, &index)?;

    let mut out = Vec::with_capacity(files.len());
    for file in files {
        if file.name.contains("google/protobuf") {
            continue;
        }
        out.push(GeneratedFile {
            name:    output_name(&file.name),
            content: generate_file(file, &plans),
        });
    }
    Ok(out)
}

fn generate_file(file: &SchemaFile, plans: &BTreeMap<String, MessagePlan>) -> String {
    let prefix = dotted_package(file.package.as_deref());
    let mut ordered: Vec<&MessagePlan> = Vec::new();
    for def in &file.messages {
        collect_plans(&prefix, def, plans, &mut ordered);
    }

    let uses_composite = ordered.iter().any(|plan| {
        plan.fields
            .iter()
            .any(|field| !matches!(field, ClassifiedField::TranslatableScalar { .. }))
    });

    let mut code: Vec<String> = Vec::new();
    code.push(format!("// Code generated by glotc from {}. DO NOT EDIT.", file.name));
    if let Some(package) = &file.package {
        code.push(format!("// package: {}", package));
    }
    code.push(String::new());
    if uses_composite {
        code.push("use glot_runtime::{reconcile, Composite, KeyGetter, MessageNode, ReconcileError, TranslationMap};".to_string());
    } else {
        code.push("use glot_runtime::{reconcile, KeyGetter, MessageNode, ReconcileError, TranslationMap};".to_string());
    }
    code.push("use super::*;".to_string());

    for plan in ordered {
        code.push(String::new());
        code.push(generate_message(plan));
    }
    code.push(String::new());
    code.join("\n")
}

// Nested types emit before the enclosing type, matching plan order.
fn collect_plans<'a>(
    prefix: &str,
    def: &TypeDef,
    plans: &'a BTreeMap<String, MessagePlan>,
    out: &mut Vec<&'a MessagePlan>,
) {
    if def.is_map_entry {
        return;
    }
    let qualified = format!("{}{}", prefix, def.name);
    for nested in &def.nested {
        collect_plans(&format!("{}.", qualified), nested, plans, out);
    }
    if let Some(plan) = plans.get(&qualified) {
        out.push(plan);
    }
}

fn accessor(name: &str) -> String {
    escape_rust_keyword(&to_snake_case(name))
}

fn generate_message(plan: &MessagePlan) -> String {
    let node_param = if plan.fields.is_empty() { "_node" } else { "node" };
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("impl {} {{", plan.rust_name));
    lines.push("    /// Pulls this message's translatable strings into a flat key -> text".to_string());
    lines.push("    /// map, stamping each field with the key chosen by `keys`.".to_string());
    lines.push("    pub fn extract_translations(".to_string());
    lines.push("        &mut self,".to_string());
    lines.push("        previous: Option<&Self>,".to_string());
    lines.push("        keys: &dyn KeyGetter,".to_string());
    lines.push("    ) -> Result<TranslationMap, ReconcileError> {".to_string());
    lines.push("        let mut node = self.to_trans_node();".to_string());
    lines.push("        let previous = previous.map(|message| message.to_trans_node());".to_string());
    lines.push("        let translations = reconcile::extract(&mut node, previous.as_ref(), keys)?;".to_string());
    lines.push("        self.absorb_keys(&node);".to_string());
    lines.push("        Ok(translations)".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());
    lines.push("    /// Lists the stamped keys needed to translate this message into any locale.".to_string());
    lines.push("    pub fn get_translation_keys(&self) -> Vec<String> {".to_string());
    lines.push("        reconcile::translation_keys(&self.to_trans_node())".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());
    lines.push("    /// Replaces this message's translatable strings with `lookup` of their".to_string());
    lines.push("    /// stamped keys; a key without a translation leaves an empty string.".to_string());
    lines.push("    pub fn translate(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {".to_string());
    lines.push("        let node = reconcile::translate(&self.to_trans_node(), lookup);".to_string());
    lines.push("        self.absorb_text(&node);".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push("    fn to_trans_node(&self) -> MessageNode {".to_string());
    if plan.fields.is_empty() {
        lines.push("        MessageNode::new()".to_string());
    } else {
        lines.push("        MessageNode::new()".to_string());
        for field in &plan.fields {
            lines.extend(builder_lines(field));
        }
    }
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push(format!("    fn absorb_keys(&mut self, {}: &MessageNode) {{", node_param));
    for field in &plan.fields {
        lines.extend(absorb_lines(field, "key", "absorb_keys"));
    }
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push(format!("    fn absorb_text(&mut self, {}: &MessageNode) {{", node_param));
    for field in &plan.fields {
        lines.extend(absorb_lines(field, "text", "absorb_text"));
    }
    lines.push("    }".to_string());
    lines.push("}".to_string());

    lines.join("\n")
}

fn builder_lines(field: &ClassifiedField) -> Vec<String> {
    match field {
        ClassifiedField::TranslatableScalar { name, repeated: false } => vec![format!(
            "            .field(\"{}\", self.{}.clone())",
            name,
            accessor(name)
        )],
        ClassifiedField::TranslatableScalar { name, repeated: true } => vec![format!(
            "            .field_array(\"{}\", self.{}.clone())",
            name,
            accessor(name)
        )],
        ClassifiedField::CompositeSingular { name, .. } => vec![
            format!("            .child(\"{}\", match &self.{} {{", name, accessor(name)),
            "                Some(child) => Composite::Single(Box::new(child.to_trans_node())),".to_string(),
            "                None => Composite::Absent,".to_string(),
            "            })".to_string(),
        ],
        ClassifiedField::CompositeArray { name, .. } => vec![format!(
            "            .child(\"{}\", Composite::Array(self.{}.iter().map(|child| child.to_trans_node()).collect()))",
            name,
            accessor(name)
        )],
        ClassifiedField::CompositeMap { name, .. } => vec![format!(
            "            .child(\"{}\", Composite::Map(self.{}.iter().map(|(key, child)| (key.clone(), child.to_trans_node())).collect()))",
            name,
            accessor(name)
        )],
    }
}

fn absorb_lines(field: &ClassifiedField, member: &str, method: &str) -> Vec<String> {
    match field {
        ClassifiedField::TranslatableScalar { name, repeated: false } => vec![
            format!("        if let Some(value) = node.single(\"{}\") {{", name),
            format!("            self.{}.{} = value.{}.clone();", accessor(name), member, member),
            "        }".to_string(),
        ],
        ClassifiedField::TranslatableScalar { name, repeated: true } => vec![
            format!("        if let Some(values) = node.array(\"{}\") {{", name),
            format!(
                "            for (field, value) in self.{}.iter_mut().zip(values) {{",
                accessor(name)
            ),
            format!("                field.{} = value.{}.clone();", member, member),
            "            }".to_string(),
            "        }".to_string(),
        ],
        ClassifiedField::CompositeSingular { name, .. } => vec![
            format!(
                "        if let Some(Composite::Single(child)) = node.composite(\"{}\") {{",
                name
            ),
            format!("            if let Some(field) = self.{}.as_mut() {{", accessor(name)),
            format!("                field.{}(child);", method),
            "            }".to_string(),
            "        }".to_string(),
        ],
        ClassifiedField::CompositeArray { name, .. } => vec![
            format!(
                "        if let Some(Composite::Array(children)) = node.composite(\"{}\") {{",
                name
            ),
            format!(
                "            for (field, child) in self.{}.iter_mut().zip(children) {{",
                accessor(name)
            ),
            format!("                field.{}(child);", method),
            "            }".to_string(),
            "        }".to_string(),
        ],
        ClassifiedField::CompositeMap { name, .. } => vec![
            format!(
                "        if let Some(Composite::Map(children)) = node.composite(\"{}\") {{",
                name
            ),
            format!("            for (key, field) in self.{}.iter_mut() {{", accessor(name)),
            "                if let Some(child) = children.get(key) {".to_string(),
            format!("                    field.{}(child);", method),
            "                }".to_string(),
            "            }".to_string(),
        "        }".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_file;

    #[test]
    fn output_name_replaces_extension() {
        assert_eq!(output_name("listing.glot"), "listing_trans.rs");
        assert_eq!(output_name("idl/listing.glot"), "idl/listing_trans.rs");
    }

    #[test]
    fn generates_impls_for_nested_messages_first() {
        let file = compile_file(
            "listing.glot",
            r#"
            package demo;

            message Listing {
              string title = 1 [translated];
              Section intro = 2;
              message Section {
                string heading = 1 [translated];
              }
            }
            "#,
        )
        .unwrap();

        let files = [file];
        let generated = generate_files(&files).unwrap();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].name, "listing_trans.rs");

        let content = &generated[0].content;
        let section = content.find("impl ListingSection {").unwrap();
        let listing = content.find("impl Listing {").unwrap();
        assert!(section < listing);
        assert!(content.contains(".field(\"title\", self.title.clone())"));
        assert!(content.contains(".child(\"intro\", match &self.intro {"));
    }

    #[test]
    fn well_known_schema_files_are_skipped() {
        let wkt = compile_file(
            "google/protobuf/timestamp.glot",
            "package google.protobuf; message Timestamp { int64 seconds = 1; }",
        )
        .unwrap();
        let files = [wkt];
        assert!(generate_files(&files).unwrap().is_empty());
    }

    #[test]
    fn empty_message_takes_unused_node_param() {
        let file = compile_file("empty.glot", "message Empty { int count = 1; }").unwrap();
        let files = [file];
        let generated = generate_files(&files).unwrap();
        assert!(generated[0].content.contains("fn absorb_keys(&mut self, _node: &MessageNode)"));
    }
}
