use thiserror::Error;

// Unified error type for numat

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NumatError>;

#[derive(Error, Debug)]
pub enum NumatError {
    #[error("no matching signature for {name}({found})")]
    NoMatchingSignature { name: String, found: String },
    #[error("ambiguous signatures for {name}({found}): {left} vs {right}")]
    AmbiguousSignature {
        name: String,
        found: String,
        left: String,
        right: String,
    },
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),
    #[error("invalid suite for {0}: {1}")]
    InvalidSuite(&'static str, String),
    #[error("{0}")]
    DomainError(String),
}
