//! Traversals combining two sparse operands.
//!
//! All members walk both operands column by column with a two-pointer
//! merge over the sorted row indices, so work is linear in explicit
//! entries (except [`sparse_full`], which must touch every cell). They
//! differ in how a cell present on only one side is handled — kept
//! verbatim, computed against zero, or skipped — and in whether a cell
//! absent on both sides can stay implicit. Those choices are licences
//! granted by the kernel's declared [`ZeroLaws`](crate::elementwise::ZeroLaws);
//! the suite builder enforces them.

use crate::config::Config;
use crate::dispatch::TypedFn;
use crate::elementwise::invoke;
use crate::error::{NumatError, Result};
use crate::matrix::{DenseMatrix, SparseBuilder, SparseMatrix};
use crate::value::Value;

fn check_dims(a: &SparseMatrix, b: &SparseMatrix) -> Result<(usize, usize)> {
    if a.shape() != b.shape() {
        return Err(NumatError::DimensionMismatch {
            expected: a.shape().to_vec(),
            got: b.shape().to_vec(),
        });
    }
    Ok((a.rows(), a.cols()))
}

/// Union merge keeping one-sided entries verbatim.
///
/// Licensed by `op(x, 0) = x` and `op(0, y) = y`: a cell explicit on one
/// side only is copied through without invoking the kernel. Cells present
/// on both sides are computed and dropped again if they test as zero.
pub fn sparse_union_keep(
    a: &SparseMatrix,
    b: &SparseMatrix,
    op: &TypedFn,
    config: &Config,
) -> Result<Value> {
    let (rows, cols) = check_dims(a, b)?;
    let mut builder = SparseBuilder::new(rows, cols, a.kind());
    for j in 0..cols {
        let (ra, va) = a.col(j);
        let (rb, vb) = b.col(j);
        let (mut i, mut k) = (0, 0);
        while i < ra.len() && k < rb.len() {
            if ra[i] == rb[k] {
                let r = invoke(op, false, &va[i], &vb[k])?;
                if !r.is_zero(config) {
                    builder.push(ra[i], r);
                }
                i += 1;
                k += 1;
            } else if ra[i] < rb[k] {
                builder.push(ra[i], va[i].clone());
                i += 1;
            } else {
                builder.push(rb[k], vb[k].clone());
                k += 1;
            }
        }
        for (&r, v) in ra[i..].iter().zip(&va[i..]) {
            builder.push(r, v.clone());
        }
        for (&r, v) in rb[k..].iter().zip(&vb[k..]) {
            builder.push(r, v.clone());
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}

/// Union merge computing one-sided entries against zero.
///
/// Licensed by `op(0, 0) = 0` only: cells absent on both sides stay
/// implicit, everything else goes through the kernel with the missing
/// side contributing that operand's zero element.
pub fn sparse_union_apply(
    a: &SparseMatrix,
    b: &SparseMatrix,
    op: &TypedFn,
    config: &Config,
) -> Result<Value> {
    let (rows, cols) = check_dims(a, b)?;
    let zero_a = a.zero();
    let zero_b = b.zero();
    let mut builder = SparseBuilder::new(rows, cols, a.kind());
    for j in 0..cols {
        let (ra, va) = a.col(j);
        let (rb, vb) = b.col(j);
        let (mut i, mut k) = (0, 0);
        while i < ra.len() || k < rb.len() {
            let (row, r) = if k >= rb.len() || (i < ra.len() && ra[i] < rb[k]) {
                let r = invoke(op, false, &va[i], &zero_b)?;
                i += 1;
                (ra[i - 1], r)
            } else if i >= ra.len() || rb[k] < ra[i] {
                let r = invoke(op, false, &zero_a, &vb[k])?;
                k += 1;
                (rb[k - 1], r)
            } else {
                let r = invoke(op, false, &va[i], &vb[k])?;
                i += 1;
                k += 1;
                (ra[i - 1], r)
            };
            if !r.is_zero(config) {
                builder.push(row, r);
            }
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}

/// Intersection merge: only cells explicit on both sides are computed.
///
/// Licensed by annihilation on both sides, `op(x, 0) = 0 = op(0, y)`.
pub fn sparse_intersect(
    a: &SparseMatrix,
    b: &SparseMatrix,
    op: &TypedFn,
    config: &Config,
) -> Result<Value> {
    let (rows, cols) = check_dims(a, b)?;
    let mut builder = SparseBuilder::new(rows, cols, a.kind());
    for j in 0..cols {
        let (ra, va) = a.col(j);
        let (rb, vb) = b.col(j);
        let (mut i, mut k) = (0, 0);
        while i < ra.len() && k < rb.len() {
            if ra[i] == rb[k] {
                let r = invoke(op, false, &va[i], &vb[k])?;
                if !r.is_zero(config) {
                    builder.push(ra[i], r);
                }
                i += 1;
                k += 1;
            } else if ra[i] < rb[k] {
                i += 1;
            } else {
                k += 1;
            }
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}

/// Fully general: every cell is computed, including cells implicit on
/// both sides. Dense result, since `op(0, 0)` need not be zero.
pub fn sparse_full(a: &SparseMatrix, b: &SparseMatrix, op: &TypedFn) -> Result<Value> {
    check_dims(a, b)?;
    let da = a.to_dense();
    let db = b.to_dense();
    let mut data = Vec::with_capacity(da.len());
    for (x, y) in da.data().iter().zip(db.data()) {
        data.push(invoke(op, false, x, y)?);
    }
    Ok(Value::Dense(DenseMatrix::new(data, da.shape().to_vec())?))
}

/// Left-only entries are kept verbatim, right-only entries stay implicit.
///
/// Licensed by `op(x, 0) = x` together with `op(0, y) = 0` — the shift
/// shape: shifting by zero is the identity, shifting zero yields zero.
pub fn sparse_keep_left(
    a: &SparseMatrix,
    b: &SparseMatrix,
    op: &TypedFn,
    config: &Config,
) -> Result<Value> {
    let (rows, cols) = check_dims(a, b)?;
    let mut builder = SparseBuilder::new(rows, cols, a.kind());
    for j in 0..cols {
        let (ra, va) = a.col(j);
        let (rb, vb) = b.col(j);
        let (mut i, mut k) = (0, 0);
        while i < ra.len() {
            while k < rb.len() && rb[k] < ra[i] {
                k += 1;
            }
            if k < rb.len() && rb[k] == ra[i] {
                let r = invoke(op, false, &va[i], &vb[k])?;
                if !r.is_zero(config) {
                    builder.push(ra[i], r);
                }
                k += 1;
            } else {
                builder.push(ra[i], va[i].clone());
            }
            i += 1;
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}

/// The left pattern is walked in full, right-only entries stay implicit.
///
/// Licensed by `op(0, y) = 0`: cells the left operand does not store
/// cannot produce output, but every stored left cell goes through the
/// kernel even when the right side is implicit. This differs from
/// [`sparse_intersect`] exactly on left-entry/right-implicit cells, where
/// `op(x, 0)` may be nonzero (or NaN) even for annihilating kernels.
pub fn sparse_apply_left(
    a: &SparseMatrix,
    b: &SparseMatrix,
    op: &TypedFn,
    config: &Config,
) -> Result<Value> {
    let (rows, cols) = check_dims(a, b)?;
    let zero_b = b.zero();
    let mut builder = SparseBuilder::new(rows, cols, a.kind());
    for j in 0..cols {
        let (ra, va) = a.col(j);
        let (rb, vb) = b.col(j);
        let mut k = 0;
        for (&row, v) in ra.iter().zip(va) {
            while k < rb.len() && rb[k] < row {
                k += 1;
            }
            let rhs = if k < rb.len() && rb[k] == row { &vb[k] } else { &zero_b };
            let r = invoke(op, false, v, rhs)?;
            if !r.is_zero(config) {
                builder.push(row, r);
            }
        }
        builder.close_column();
    }
    Ok(Value::Sparse(builder.finish()))
}
