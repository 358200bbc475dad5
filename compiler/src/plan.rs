use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    classify::{classify_fields, ClassifiedField},
    error::GlotError,
    index::TypeIndex,
    types::{SchemaFile, TypeDef},
    utils::to_pascal_case,
    verifier::dotted_package,
};

/// Ordered classification of one message type's fields, cached by
/// fully-qualified type name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePlan {
    pub qualified_name: String,
    /// Rust type name the generator targets; nesting flattens by PascalCase
    /// concatenation (`Listing` + `Section` -> `ListingSection`).
    pub rust_name: String,
    pub fields: Vec<ClassifiedField>,
}

/// Walks every message type in the schema set (nested types first, map
/// entries skipped) and classifies its fields. Idempotent: the same schema
/// set always yields identical plans.
pub fn build_plans(
    files: &[SchemaFile],
    index: &TypeIndex,
) -> Result<BTreeMap<String, MessagePlan>, GlotError> {
    let mut plans = BTreeMap::new();
    for file in files {
        let prefix = dotted_package(file.package.as_deref());
        for def in &file.messages {
            plan_type(&prefix, "", def, index, &mut plans)?;
        }
    }
    Ok(plans)
}

fn plan_type(
    prefix: &str,
    rust_prefix: &str,
    def: &TypeDef,
    index: &TypeIndex,
    plans: &mut BTreeMap<String, MessagePlan>,
) -> Result<(), GlotError> {
    if def.is_map_entry {
        return Ok(());
    }

    let qualified_name = format!("{}{}", prefix, def.name);
    let rust_name = format!("{}{}", rust_prefix, to_pascal_case(&def.name));

    // Nested plans land first so one generation pass never revisits a type.
    for nested in &def.nested {
        plan_type(&format!("{}.", qualified_name), &rust_name, nested, index, plans)?;
    }

    let fields = classify_fields(def, index)?;
    plans.insert(
        qualified_name.clone(),
        MessagePlan {
            qualified_name,
            rust_name,
            fields,
        },
    );
    Ok(())
}
