//! Traversals broadcasting a scalar against a sparse operand.
//!
//! As with the dense/sparse members, `invert` records that the scalar was
//! originally the left operand. The members differ in what an implicit
//! cell becomes: still implicit, the scalar itself, or `op(0, scalar)`.

use crate::config::Config;
use crate::dispatch::TypedFn;
use crate::elementwise::invoke;
use crate::error::Result;
use crate::matrix::{DenseMatrix, SparseBuilder, SparseMatrix};
use crate::scalar::Scalar;
use crate::value::Value;

/// Implicit cells stay implicit; explicit entries go through the kernel.
///
/// Licensed by `op(0, s) = 0` (or the mirrored law when inverted).
/// Sparse result; computed zeros are dropped.
pub fn sparse_scalar_zero(
    a: &SparseMatrix,
    s: &Scalar,
    op: &TypedFn,
    invert: bool,
    config: &Config,
) -> Result<Value> {
    let [rows, cols] = a.shape();
    let mut builder = SparseBuilder::new(rows, cols, a.kind());
    for j in 0..cols {
        let (rs, values) = a.col(j);
        for (&i, v) in rs.iter().zip(values) {
            let r = invoke(op, invert, v, s)?;
            if !r.is_zero(config) {
                builder.push(i, r);
            }
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}

/// Implicit cells become the scalar itself.
///
/// Licensed by `op(0, s) = s` (or the mirrored law when inverted), the
/// addition shape. Dense result — a nonzero scalar densifies.
pub fn sparse_scalar_keep(
    a: &SparseMatrix,
    s: &Scalar,
    op: &TypedFn,
    invert: bool,
) -> Result<Value> {
    let [rows, cols] = a.shape();
    let mut out = DenseMatrix::filled(s.clone(), vec![rows, cols]);
    for j in 0..cols {
        let (rs, values) = a.col(j);
        for (&i, v) in rs.iter().zip(values) {
            out.data_mut()[i * cols + j] = invoke(op, invert, v, s)?;
        }
    }
    Ok(Value::Dense(out))
}

/// Fully general: implicit cells become `op(0, scalar)` (in the caller's
/// argument order). Dense result.
pub fn sparse_scalar_full(
    a: &SparseMatrix,
    s: &Scalar,
    op: &TypedFn,
    invert: bool,
) -> Result<Value> {
    let [rows, cols] = a.shape();
    let fill = invoke(op, invert, &a.zero(), s)?;
    let mut out = DenseMatrix::filled(fill, vec![rows, cols]);
    for j in 0..cols {
        let (rs, values) = a.col(j);
        for (&i, v) in rs.iter().zip(values) {
            out.data_mut()[i * cols + j] = invoke(op, invert, v, s)?;
        }
    }
    Ok(Value::Dense(out))
}
