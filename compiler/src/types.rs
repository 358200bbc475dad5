use serde::Serialize;

/// One parsed `.glot` schema file. The file name drives the name of the
/// generated output artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaFile {
    pub name:     String,
    pub package:  Option<String>,
    pub messages: Vec<TypeDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub name:         String,
    pub line:         usize,
    pub column:       usize,
    pub fields:       Vec<FieldDef>,
    pub nested:       Vec<TypeDef>,
    /// True only for the synthesized key/value wrapper types representing
    /// map fields; such types are never independently classified.
    pub is_map_entry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarType {
    Bool,
    Byte,
    Int,
    UInt,
    Float,
    String,
    Int64,
    UInt64,
}

impl ScalarType {
    pub fn parse(name: &str) -> Option<ScalarType> {
        match name {
            "bool"   => Some(ScalarType::Bool),
            "byte"   => Some(ScalarType::Byte),
            "int"    => Some(ScalarType::Int),
            "uint"   => Some(ScalarType::UInt),
            "float"  => Some(ScalarType::Float),
            "string" => Some(ScalarType::String),
            "int64"  => Some(ScalarType::Int64),
            "uint64" => Some(ScalarType::UInt64),
            _        => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldType {
    Scalar(ScalarType),
    /// Referenced message type. Holds the declared name as written until
    /// the resolver pass rewrites it to the fully-qualified dotted form
    /// (leading dot; an empty package yields `.Name`).
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub name:       String,
    pub line:       usize,
    pub column:     usize,
    pub ty:         FieldType,
    pub repeated:   bool,
    /// The `[translated]` annotation; valid only on string fields.
    pub translated: bool,
    pub tag:        i32,
}
