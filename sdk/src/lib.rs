//! glot
//!
//! Facade crate tying the compiler and the runtime together:
//!
//! - compile `.glot` schemas and generate `_trans.rs` sources
//!   (re-exported from `glot-compiler`),
//! - run extraction/translation over message trees at application runtime
//!   (re-exported from `glot-runtime`).

use std::collections::BTreeMap;

pub use glot_compiler::error::GlotError;
pub use glot_compiler::{
    analyze, compile_file, compile_files, compile_to_rust, generate_files, GeneratedFile,
    MessagePlan, SchemaFile,
};
pub use glot_runtime::{
    content_key, Composite, ContentKeys, KeyGetter, MessageNode, ReconcileError, ReuseKeys,
    TransString, TranslationMap,
};

/// Pretty-print a plan set as JSON.
pub fn plans_to_json(plans: &BTreeMap<String, MessagePlan>) -> String {
    serde_json::to_string_pretty(plans).unwrap()
}

pub mod compiler {
    pub use glot_compiler::*;
}

pub mod runtime {
    pub use glot_runtime::*;
}

pub mod error {
    pub use glot_compiler::error::GlotError;
    pub use glot_runtime::error::ReconcileError;
}
