use thiserror::Error;

/// Failures that abort code generation for a whole workspace.
///
/// Everything the user can produce by editing (empty slots, bad numbers,
/// unknown names) is absorbed with a default instead; these variants only
/// fire when the graph does not fit the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("unknown block kind `{0}`")]
    UnknownKind(String),

    #[error("block `{kind}` is a statement and cannot fill value slot `{slot}`")]
    NotAnExpression { kind: String, slot: String },

    #[error("block `{0}` produces a value and cannot appear in a statement chain")]
    NotAStatement(String),

    #[error("block nesting exceeds {0} levels")]
    TooDeep(usize),

    #[error("generator panicked: {0}")]
    Panicked(String),
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
