use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Verifier error: {0}")]
    VerifierError(String),

    /// Fatal schema error: the whole generation run stops, no partial
    /// output is emitted.
    #[error("'translated' option used with non-string field (message = {message}, field = {field})")]
    Annotation { message: String, field: String },
}
