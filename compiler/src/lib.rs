//! glot-compiler
//!
//! This crate implements:
//!  1) A tokenizer + parser for `.glot` IDL files (messages, nesting,
//!     repeated fields, string-keyed maps, the `[translated]` annotation),
//!  2) A resolver + verifier (qualified type names, duplicate fields/tags,
//!     missing types),
//!  3) Schema analysis: the type index, the field classifier, and the
//!     per-message plan builder,
//!  4) Code generation (`generate_files` -> one `_trans.rs` per schema),
//!  5) Error types (`GlotError`).

pub mod classify;
pub mod compiler;
pub mod error;
pub mod gen_rust;
pub mod index;
pub mod parser;
pub mod plan;
pub mod tokenizer;
pub mod types;
pub mod utils;
pub mod verifier;

pub use classify::{classify_fields, ClassifiedField};
pub use compiler::{analyze, compile_file, compile_files, compile_to_rust};
pub use error::GlotError;
pub use gen_rust::{generate_files, output_name, GeneratedFile};
pub use index::TypeIndex;
pub use plan::{build_plans, MessagePlan};
pub use types::{FieldDef, FieldType, ScalarType, SchemaFile, TypeDef};
