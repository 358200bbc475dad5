#![cfg(test)]

use glot_compiler::{
    analyze, compile_file, compile_files,
    classify::ClassifiedField,
    error::GlotError,
    types::{FieldType, ScalarType},
};

const LISTING_GLOT: &str = r#"
package demo;

message Listing {
  string id = 1;
  string title = 2 [translated];
  repeated string tags = 3 [translated];
  Section intro = 4;
  repeated Section sections = 5;
  map<string, Section> extras = 6;
  map<string, string> labels = 7;
  google.protobuf.Timestamp created = 8;

  message Section {
    string heading = 1 [translated];
    repeated Section parts = 2;
  }
}
"#;

#[test]
fn test_parse_schema() {
    let file = compile_file("listing.glot", LISTING_GLOT).expect("compile_file failed");

    assert_eq!(file.package.as_deref(), Some("demo"));
    assert_eq!(file.messages.len(), 1);

    let listing = &file.messages[0];
    assert_eq!(listing.name, "Listing");
    assert!(!listing.is_map_entry);
    assert_eq!(listing.fields.len(), 8);

    // Plain scalar field
    assert_eq!(listing.fields[0].name, "id");
    assert_eq!(listing.fields[0].ty, FieldType::Scalar(ScalarType::String));
    assert!(!listing.fields[0].translated);
    assert_eq!(listing.fields[0].tag, 1);

    // Translated singular and repeated strings
    assert!(listing.fields[1].translated);
    assert!(!listing.fields[1].repeated);
    assert!(listing.fields[2].translated);
    assert!(listing.fields[2].repeated);

    // Message references resolve to fully-qualified dotted names
    assert_eq!(
        listing.fields[3].ty,
        FieldType::Message(".demo.Listing.Section".to_string())
    );
    assert!(listing.fields[4].repeated);

    // Map fields desugar to repeated references to a synthesized entry type
    assert_eq!(
        listing.fields[5].ty,
        FieldType::Message(".demo.Listing.ExtrasEntry".to_string())
    );
    assert!(listing.fields[5].repeated);

    // Well-known reference needs no definition
    assert_eq!(
        listing.fields[7].ty,
        FieldType::Message(".google.protobuf.Timestamp".to_string())
    );

    // Nested: Section plus two synthesized entry wrappers
    assert_eq!(listing.nested.len(), 3);
    let section = listing.nested.iter().find(|t| t.name == "Section").unwrap();
    // Self-referential nested type resolves into its own scope
    assert_eq!(
        section.fields[1].ty,
        FieldType::Message(".demo.Listing.Section".to_string())
    );

    let extras_entry = listing.nested.iter().find(|t| t.name == "ExtrasEntry").unwrap();
    assert!(extras_entry.is_map_entry);
    assert_eq!(extras_entry.fields[0].name, "key");
    assert_eq!(extras_entry.fields[1].name, "value");
    assert_eq!(
        extras_entry.fields[1].ty,
        FieldType::Message(".demo.Listing.Section".to_string())
    );
}

#[test]
fn test_plans() {
    let file = compile_file("listing.glot", LISTING_GLOT).unwrap();
    let files = [file];
    let plans = analyze(&files).unwrap();

    // One plan per message type; map-entry wrappers are never planned.
    assert_eq!(plans.len(), 2);
    assert!(!plans.contains_key(".demo.Listing.ExtrasEntry"));
    assert!(!plans.contains_key(".demo.Listing.LabelsEntry"));

    let listing = &plans[".demo.Listing"];
    assert_eq!(listing.rust_name, "Listing");
    assert_eq!(
        listing.fields,
        vec![
            ClassifiedField::TranslatableScalar { name: "title".into(), repeated: false },
            ClassifiedField::TranslatableScalar { name: "tags".into(), repeated: true },
            ClassifiedField::CompositeSingular {
                name: "intro".into(),
                type_name: ".demo.Listing.Section".into(),
            },
            ClassifiedField::CompositeArray {
                name: "sections".into(),
                type_name: ".demo.Listing.Section".into(),
            },
            // extras keeps its message-valued map; the scalar-valued
            // labels map and the well-known created field are dropped.
            ClassifiedField::CompositeMap {
                name: "extras".into(),
                value_type: ".demo.Listing.Section".into(),
            },
        ]
    );

    let section = &plans[".demo.Listing.Section"];
    assert_eq!(section.rust_name, "ListingSection");
    assert_eq!(section.fields.len(), 2);
}

#[test]
fn test_analyze_is_idempotent() {
    let file = compile_file("listing.glot", LISTING_GLOT).unwrap();
    let files = [file];
    assert_eq!(analyze(&files).unwrap(), analyze(&files).unwrap());
}

#[test]
fn test_translated_on_non_string_is_fatal() {
    let file = compile_file(
        "bad.glot",
        "message Bad { int count = 1 [translated]; }",
    )
    .unwrap();
    let files = [file];
    let err = analyze(&files).unwrap_err();
    match err {
        GlotError::Annotation { message, field } => {
            assert_eq!(message, "Bad");
            assert_eq!(field, "count");
        }
        other => panic!("expected an annotation error but got {:?}", other),
    }
}

#[test]
fn test_cross_file_references() {
    let sources = [
        (
            "common.glot".to_string(),
            "package demo; message Section { string heading = 1 [translated]; }".to_string(),
        ),
        (
            "listing.glot".to_string(),
            "package demo; message Listing { Section intro = 1; }".to_string(),
        ),
    ];
    let files = compile_files(&sources).unwrap();
    assert_eq!(
        files[1].messages[0].fields[0].ty,
        FieldType::Message(".demo.Section".to_string())
    );
}

#[test]
fn test_unknown_type_reference() {
    let err = compile_file("bad.glot", "message Bad { Missing thing = 1; }").unwrap_err();
    assert!(matches!(err, GlotError::VerifierError(_)));
}

#[test]
fn test_duplicate_field_tag() {
    let err = compile_file(
        "bad.glot",
        "message Bad { string a = 1; string b = 1; }",
    )
    .unwrap_err();
    assert!(matches!(err, GlotError::VerifierError(_)));
}

#[test]
fn test_map_keys_must_be_string() {
    let err = compile_file(
        "bad.glot",
        "message Bad { map<int, Bad> entries = 1; }",
    )
    .unwrap_err();
    assert!(matches!(err, GlotError::ParseError { .. }));
}
