//! Matrix module: dense and sparse storage for tower scalars.

pub mod dense;
pub use dense::DenseMatrix;
pub mod sparse;
pub use sparse::{SparseBuilder, SparseMatrix};
