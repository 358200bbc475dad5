use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The `current` and `previous` trees disagree on the shape of a field
    /// (e.g. an array slot on one side, a single value on the other). Trees
    /// produced by generated code from the same message type always agree,
    /// so this indicates a caller contract violation.
    #[error("structural mismatch at field \"{field}\"")]
    ShapeMismatch { field: &'static str },
}
