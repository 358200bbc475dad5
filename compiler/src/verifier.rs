use std::collections::HashSet;

use crate::{
    error::GlotError,
    types::{FieldType, SchemaFile, TypeDef},
    utils::quote,
};

/// Foreign well-known types live under this namespace, need no definition
/// in the schema set, and are guaranteed to carry no translation
/// annotations.
pub const WELL_KNOWN_PREFIX: &str = ".google.protobuf";

/// Rewrites every message-typed field reference in `files` to its
/// fully-qualified dotted name, resolving declared names against enclosing
/// scopes from innermost out (the whole schema set is one namespace, so a
/// type in one file may reference a type defined in another).
///
/// Returns `Err(GlotError::VerifierError)` for a reference that matches no
/// definition and is not a well-known type.
pub fn resolve_schemas(files: &mut [SchemaFile]) -> Result<(), GlotError> {
    let mut defined: HashSet<String> = HashSet::new();
    for file in files.iter() {
        let prefix = dotted_package(file.package.as_deref());
        for def in &file.messages {
            collect_names(&prefix, def, &mut defined);
        }
    }

    for file in files.iter_mut() {
        let prefix = dotted_package(file.package.as_deref());
        // Scope chain starts at the package; each nested message pushes one
        // more segment.
        let scope = prefix.trim_start_matches('.').trim_end_matches('.');
        let mut scopes: Vec<String> = if scope.is_empty() {
            Vec::new()
        } else {
            scope.split('.').map(str::to_string).collect()
        };
        for def in &mut file.messages {
            resolve_type(def, &mut scopes, &defined)?;
        }
    }

    Ok(())
}

/// Dotted package prefix for qualified names. Empty package yields a single
/// leading dot, so the qualified name of `X` is `.X`; otherwise `.pkg.X`.
pub fn dotted_package(package: Option<&str>) -> String {
    match package {
        Some(pkg) if !pkg.is_empty() => format!(".{}.", pkg),
        _ => ".".to_string(),
    }
}

fn collect_names(prefix: &str, def: &TypeDef, out: &mut HashSet<String>) {
    let name = format!("{}{}", prefix, def.name);
    out.insert(name.clone());
    for nested in &def.nested {
        collect_names(&format!("{}.", name), nested, out);
    }
}

fn resolve_type(
    def: &mut TypeDef,
    scopes: &mut Vec<String>,
    defined: &HashSet<String>,
) -> Result<(), GlotError> {
    scopes.push(def.name.clone());

    for field in &mut def.fields {
        if let FieldType::Message(name) = &mut field.ty {
            match resolve_name(name, scopes, defined) {
                Some(qualified) => *name = qualified,
                None => {
                    return Err(GlotError::VerifierError(format!(
                        "The type {} is not defined for field {}",
                        quote(name),
                        quote(&field.name)
                    )))
                }
            }
        }
    }

    for nested in &mut def.nested {
        resolve_type(nested, scopes, defined)?;
    }

    scopes.pop();
    Ok(())
}

fn resolve_name(declared: &str, scopes: &[String], defined: &HashSet<String>) -> Option<String> {
    if declared.starts_with("google.protobuf.") {
        return Some(format!(".{}", declared));
    }
    // Innermost scope wins, then each enclosing scope, then the root.
    for depth in (0..=scopes.len()).rev() {
        let mut candidate = String::from(".");
        for segment in &scopes[..depth] {
            candidate.push_str(segment);
            candidate.push('.');
        }
        candidate.push_str(declared);
        if defined.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Structural checks over one resolved schema file. Returns `Ok(())` if
/// verification passed, or `Err(GlotError::VerifierError(_))` otherwise.
pub fn verify_schema(file: &SchemaFile) -> Result<(), GlotError> {
    let mut seen_types: HashSet<&str> = HashSet::new();
    for def in &file.messages {
        verify_type(def, &mut seen_types)?;
    }
    Ok(())
}

fn verify_type<'a>(def: &'a TypeDef, siblings: &mut HashSet<&'a str>) -> Result<(), GlotError> {
    if !siblings.insert(&def.name) {
        return Err(GlotError::VerifierError(format!(
            "The type {} is defined twice",
            quote(&def.name)
        )));
    }

    let mut names: HashSet<&str> = HashSet::new();
    let mut tags: Vec<i32> = Vec::new();
    for field in &def.fields {
        if !names.insert(&field.name) {
            return Err(GlotError::VerifierError(format!(
                "The field {} is defined twice",
                quote(&field.name)
            )));
        }
        if tags.contains(&field.tag) {
            return Err(GlotError::VerifierError(format!(
                "The id for field {} is used twice",
                quote(&field.name)
            )));
        }
        if field.tag <= 0 {
            return Err(GlotError::VerifierError(format!(
                "The id for field {} must be positive",
                quote(&field.name)
            )));
        }
        tags.push(field.tag);
    }

    let mut nested_names: HashSet<&str> = HashSet::new();
    for nested in &def.nested {
        verify_type(nested, &mut nested_names)?;
    }
    Ok(())
}
