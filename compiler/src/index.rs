use std::collections::HashMap;

use crate::types::{SchemaFile, TypeDef};
use crate::verifier::dotted_package;

/// Mapping from fully-qualified dotted type name to its definition, built
/// once per generation run so a field's declared type name can be resolved
/// back to the type it refers to (in particular, to detect map-entry
/// wrappers). Borrows the schema set; construct, use, discard.
pub struct TypeIndex<'a> {
    by_name: HashMap<String, &'a TypeDef>,
}

impl<'a> TypeIndex<'a> {
    pub fn build(files: &'a [SchemaFile]) -> Self {
        let mut by_name = HashMap::new();
        for file in files {
            let prefix = dotted_package(file.package.as_deref());
            for def in &file.messages {
                add_type_names(&prefix, def, &mut by_name);
            }
        }
        TypeIndex { by_name }
    }

    pub fn get(&self, qualified_name: &str) -> Option<&'a TypeDef> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn add_type_names<'a>(prefix: &str, def: &'a TypeDef, by_name: &mut HashMap<String, &'a TypeDef>) {
    let name = format!("{}{}", prefix, def.name);
    // Duplicate qualified names overwrite silently; the schema set is
    // treated as one flat namespace where the last definition wins.
    by_name.insert(name.clone(), def);

    for nested in &def.nested {
        add_type_names(&format!("{}.", name), nested, by_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_file;

    #[test]
    fn registers_nested_and_map_entry_types() {
        let file = compile_file(
            "listing.glot",
            r#"
            package demo;

            message Listing {
              map<string, Section> extras = 1;
              message Section {
                string heading = 1 [translated];
              }
            }
            "#,
        )
        .unwrap();

        let files = [file];
        let index = TypeIndex::build(&files);
        assert!(index.get(".demo.Listing").is_some());
        assert!(index.get(".demo.Listing.Section").is_some());
        let entry = index.get(".demo.Listing.ExtrasEntry").unwrap();
        assert!(entry.is_map_entry);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn empty_package_yields_leading_dot() {
        let file = compile_file("m.glot", "message M { string id = 1; }").unwrap();
        let files = [file];
        let index = TypeIndex::build(&files);
        assert!(index.get(".M").is_some());
    }

    #[test]
    fn duplicate_qualified_names_overwrite_silently() {
        let a = compile_file("a.glot", "package demo; message M { string id = 1; }").unwrap();
        let b = compile_file(
            "b.glot",
            "package demo; message M { string id = 1; string extra = 2; }",
        )
        .unwrap();

        let files = [a, b];
        let index = TypeIndex::build(&files);
        // Last write wins.
        assert_eq!(index.get(".demo.M").unwrap().fields.len(), 2);
    }
}
