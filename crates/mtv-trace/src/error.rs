use thiserror::Error;

/// Errors raised while rebuilding a search tree from a trace.
///
/// `line` is the 1-based line number within the trimmed trace text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error("malformed trace: no reasoning marker establishes a root node")]
    MalformedTrace,

    #[error("line {line}: unresolved reference: {reason}")]
    UnresolvedReference { line: usize, reason: String },

    #[error("line {line}: marker '{marker}' has no ': ' separated value")]
    MissingValue { line: usize, marker: String },

    #[error("line {line}: invalid reward value '{value}'")]
    InvalidReward { line: usize, value: String },
}
