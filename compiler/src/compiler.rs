use std::collections::BTreeMap;

use crate::{
    error::GlotError,
    gen_rust::{generate_files, GeneratedFile},
    index::TypeIndex,
    parser::parse_schema,
    plan::{build_plans, MessagePlan},
    tokenizer::tokenize_schema,
    types::SchemaFile,
    verifier::{resolve_schemas, verify_schema},
};

/// Compile a single textual schema into a resolved, verified `SchemaFile`.
/// Returns `Err(GlotError)` if tokenization/parsing/resolution/verification
/// fails.
pub fn compile_file(name: &str, text: &str) -> Result<SchemaFile, GlotError> {
    let tokens = tokenize_schema(text)?;
    let mut file = parse_schema(name, &tokens)?;
    resolve_schemas(std::slice::from_mut(&mut file))?;
    verify_schema(&file)?;
    Ok(file)
}

/// Compile a whole schema set. Files are parsed independently but resolved
/// against one shared namespace, so cross-file type references work.
pub fn compile_files(sources: &[(String, String)]) -> Result<Vec<SchemaFile>, GlotError> {
    let mut files = Vec::with_capacity(sources.len());
    for (name, text) in sources {
        let tokens = tokenize_schema(text)?;
        files.push(parse_schema(name, &tokens)?);
    }
    resolve_schemas(&mut files)?;
    for file in &files {
        verify_schema(file)?;
    }
    Ok(files)
}

/// Build the per-type message plans for a compiled schema set. The type
/// index lives only for the duration of this call.
pub fn analyze(files: &[SchemaFile]) -> Result<BTreeMap<String, MessagePlan>, GlotError> {
    let index = TypeIndex::build(files);
    build_plans(files, &index)
}

/// Compile one schema and render its generated source, end to end.
pub fn compile_to_rust(name: &str, text: &str) -> Result<GeneratedFile, GlotError> {
    let file = compile_file(name, text)?;
    let generated = generate_files(std::slice::from_ref(&file))?;
    generated.into_iter().next().ok_or_else(|| {
        GlotError::VerifierError(format!("no output generated for {}", name))
    })
}
