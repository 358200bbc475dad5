use serde::Serialize;

use crate::{
    error::GlotError,
    index::TypeIndex,
    types::{FieldType, ScalarType, TypeDef},
    verifier::WELL_KNOWN_PREFIX,
};

/// Classification of one field for translation purposes, derived from the
/// schema rather than stored in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassifiedField {
    /// String field carrying the `[translated]` annotation; repeated
    /// translated strings keep one key per position.
    TranslatableScalar { name: String, repeated: bool },
    /// Singular message-typed field whose subtree may carry translations.
    CompositeSingular { name: String, type_name: String },
    /// Repeated message-typed field; elements correlate by index.
    CompositeArray { name: String, type_name: String },
    /// Typed map with message values; entries correlate by map key.
    CompositeMap { name: String, value_type: String },
}

/// Partitions a message type's fields in declaration order. Fields that are
/// neither translated strings nor composites carrying translatable content
/// yield nothing.
pub fn classify_fields(
    owner: &TypeDef,
    index: &TypeIndex,
) -> Result<Vec<ClassifiedField>, GlotError> {
    // Map-entry wrappers are consulted only through the fields that
    // reference them, never classified on their own.
    if owner.is_map_entry {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for field in &owner.fields {
        if field.translated {
            if field.ty != FieldType::Scalar(ScalarType::String) {
                return Err(GlotError::Annotation {
                    message: owner.name.clone(),
                    field: field.name.clone(),
                });
            }
            out.push(ClassifiedField::TranslatableScalar {
                name: field.name.clone(),
                repeated: field.repeated,
            });
            continue;
        }

        // Composite fields, excluding well-known types: those are
        // guaranteed not to contain translation annotations.
        let FieldType::Message(type_name) = &field.ty else {
            continue;
        };
        if type_name.starts_with(WELL_KNOWN_PREFIX) {
            continue;
        }

        match index.get(type_name) {
            Some(entry) if entry.is_map_entry => {
                // The map value is by convention the wrapper's second
                // field. Scalar-valued maps carry no translatable content
                // and are dropped.
                if let Some(FieldType::Message(value_type)) =
                    entry.fields.get(1).map(|value| &value.ty)
                {
                    out.push(ClassifiedField::CompositeMap {
                        name: field.name.clone(),
                        value_type: value_type.clone(),
                    });
                }
            }
            _ => {
                if field.repeated {
                    out.push(ClassifiedField::CompositeArray {
                        name: field.name.clone(),
                        type_name: type_name.clone(),
                    });
                } else {
                    out.push(ClassifiedField::CompositeSingular {
                        name: field.name.clone(),
                        type_name: type_name.clone(),
                    });
                }
            }
        }
    }

    Ok(out)
}
