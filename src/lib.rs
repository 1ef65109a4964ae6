//! numat: elementwise numeric operations over dense and sparse matrices.
//!
//! The crate lifts binary scalar operations onto matrices through two
//! cooperating mechanisms: a runtime multiple dispatcher that routes each
//! call by the concrete kinds of all arguments, and a family of
//! traversal algorithms that combine dense, sparse, and scalar operands
//! while preserving sparsity wherever the operation's zero laws allow.

pub mod config;
pub mod dispatch;
pub mod elementwise;
pub mod error;
pub mod function;
pub mod matrix;
pub mod scalar;
pub mod utils;
pub mod value;

// Re-exports for convenience
pub use config::Config;
pub use dispatch::{Constraint, Pattern, Signature, TypedFn};
pub use elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, SuiteOptions, ZeroLaws,
    build_suite,
};
pub use error::{NumatError, Result};
pub use matrix::{DenseMatrix, SparseBuilder, SparseMatrix};
pub use scalar::{Quantity, Scalar, ScalarKind};
pub use value::{Value, ValueKind};
