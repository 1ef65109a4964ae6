//! Traversals combining a dense and a sparse operand.
//!
//! The dense operand always arrives first; `invert` records that the
//! caller's argument order was sparse-first, so the kernel is applied as
//! `op(sparse_cell, dense_cell)` in that case. The three members differ
//! only in what happens at cells where the sparse operand has no explicit
//! entry — keep the dense value, stay implicit, or compute against zero.

use crate::config::Config;
use crate::dispatch::TypedFn;
use crate::elementwise::invoke;
use crate::error::{NumatError, Result};
use crate::matrix::{DenseMatrix, SparseBuilder, SparseMatrix};
use crate::value::Value;

fn check_dims(d: &DenseMatrix, s: &SparseMatrix) -> Result<(usize, usize)> {
    let (rows, cols) = d.dims2()?;
    if [rows, cols] != s.shape() {
        return Err(NumatError::DimensionMismatch {
            expected: vec![rows, cols],
            got: s.shape().to_vec(),
        });
    }
    Ok((rows, cols))
}

/// Dense cells without a sparse counterpart pass through unchanged.
///
/// Licensed by `op(x, 0) = x` (or the left identity when inverted); the
/// kernel runs only where the sparse operand is explicit. Dense result.
pub fn dense_sparse_keep(
    d: &DenseMatrix,
    s: &SparseMatrix,
    op: &TypedFn,
    invert: bool,
) -> Result<Value> {
    let (_, cols) = check_dims(d, s)?;
    let mut out = d.clone();
    for j in 0..cols {
        let (rows, values) = s.col(j);
        for (&i, v) in rows.iter().zip(values) {
            out.data_mut()[i * cols + j] = invoke(op, invert, d.get2(i, j), v)?;
        }
    }
    Ok(Value::Dense(out))
}

/// Cells without a sparse counterpart stay implicit.
///
/// Licensed by `op(x, 0) = 0` (annihilation on the sparse side); the
/// kernel runs only where the sparse operand is explicit, and results
/// that test as zero are dropped again. Sparse result.
pub fn dense_sparse_zero(
    d: &DenseMatrix,
    s: &SparseMatrix,
    op: &TypedFn,
    invert: bool,
    config: &Config,
) -> Result<Value> {
    let (rows, cols) = check_dims(d, s)?;
    let mut builder = SparseBuilder::new(rows, cols, s.kind());
    for j in 0..cols {
        let (rs, values) = s.col(j);
        for (&i, v) in rs.iter().zip(values) {
            let r = invoke(op, invert, d.get2(i, j), v)?;
            if !r.is_zero(config) {
                builder.push(i, r);
            }
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}

/// Fully general: the kernel runs for every cell, implicit sparse cells
/// contributing the zero element. Dense result.
pub fn dense_sparse_full(
    d: &DenseMatrix,
    s: &SparseMatrix,
    op: &TypedFn,
    invert: bool,
) -> Result<Value> {
    check_dims(d, s)?;
    let sd = s.to_dense();
    let mut data = Vec::with_capacity(d.len());
    for (x, y) in d.data().iter().zip(sd.data()) {
        data.push(invoke(op, invert, x, y)?);
    }
    Ok(Value::Dense(DenseMatrix::new(data, d.shape().to_vec())?))
}
