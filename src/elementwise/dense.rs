//! Traversals with a dense left operand and a dense or scalar right.

use crate::dispatch::TypedFn;
use crate::elementwise::invoke;
use crate::error::{NumatError, Result};
use crate::matrix::DenseMatrix;
use crate::scalar::Scalar;
use crate::value::Value;

/// Pairwise combination of two equally shaped dense matrices.
///
/// Always produces a dense matrix; the kernel runs for every cell pair.
pub fn dense_dense(a: &DenseMatrix, b: &DenseMatrix, op: &TypedFn) -> Result<Value> {
    if a.shape() != b.shape() {
        return Err(NumatError::DimensionMismatch {
            expected: a.shape().to_vec(),
            got: b.shape().to_vec(),
        });
    }
    let mut data = Vec::with_capacity(a.len());
    for (x, y) in a.data().iter().zip(b.data()) {
        data.push(invoke(op, false, x, y)?);
    }
    Ok(Value::Dense(DenseMatrix::new(data, a.shape().to_vec())?))
}

/// Broadcast a scalar over every cell of a dense matrix.
///
/// `invert` records that the scalar was originally the left operand, so
/// the kernel still sees the caller's argument order.
pub fn dense_scalar(a: &DenseMatrix, s: &Scalar, op: &TypedFn, invert: bool) -> Result<Value> {
    let mut data = Vec::with_capacity(a.len());
    for x in a.data() {
        data.push(invoke(op, invert, x, s)?);
    }
    Ok(Value::Dense(DenseMatrix::new(data, a.shape().to_vec())?))
}
