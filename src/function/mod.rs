//! The function catalogue: thin callers over the dispatch-and-traversal
//! engine.
//!
//! Every function here follows the same recipe: build a scalar kernel as
//! a [`TypedFn`] over tower kinds, declare its zero laws, and let
//! [`build_suite`](crate::elementwise::build_suite) expand kernel plus
//! traversal choices into the full signature table. Constructors take the
//! [`Config`] by value; nothing reads ambient state.

pub mod arithmetic;
pub use arithmetic::{
    create_add, create_ceil, create_dot_divide, create_dot_multiply, create_dot_pow,
    create_floor, create_gcd, create_lcm, create_modulo, create_nth_root, create_round,
    create_sign, create_subtract,
};
pub mod bitwise;
pub use bitwise::{
    create_bit_and, create_bit_or, create_bit_xor, create_right_arith_shift,
    create_right_log_shift,
};
pub mod logical;
pub use logical::{create_and, create_not, create_or, create_xor};
pub mod relational;
pub use relational::{
    create_compare, create_equal, create_larger, create_larger_eq, create_smaller,
    create_smaller_eq, create_unequal,
};
pub mod trigonometry;
pub use trigonometry::create_atan2;

use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::{Signature, TypedFn};
use crate::error::{NumatError, Result};
use crate::matrix::{DenseMatrix, SparseBuilder};
use crate::value::Value;

/// Left-fold rest signature: `f(a, b, c, ...)` chains through the
/// already-resolved self handle.
pub(crate) fn variadic_reduce() -> Result<Signature> {
    Signature::new("any, any, ...any", |me, args| {
        let mut acc = me.call(&args[..2])?;
        for extra in &args[2..] {
            acc = me.call(&[acc, extra.clone()])?;
        }
        Ok(acc)
    })
}

/// Matrix signatures for a zero-preserving unary kernel: dense and array
/// operands map every cell, sparse operands map explicit entries only.
pub(crate) fn unary_matrix_sigs(elop: &Arc<TypedFn>, config: Config) -> Result<Vec<Signature>> {
    let mut sigs = Vec::new();
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix", move |_, args| {
        let m = args[0].as_dense()?;
        Ok(Value::Dense(m.map(|x| op.call(&[Value::Scalar(x.clone())])?.into_scalar())?))
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array", move |_, args| {
        let m = DenseMatrix::from_array(args[0].as_array()?)?;
        Ok(m.map(|x| op.call(&[Value::Scalar(x.clone())])?.into_scalar())?.to_array())
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix", move |_, args| {
        let m = args[0].as_sparse()?;
        let [rows, cols] = m.shape();
        let mut builder = SparseBuilder::new(rows, cols, m.kind());
        for j in 0..cols {
            let (rs, values) = m.col(j);
            for (&i, v) in rs.iter().zip(values) {
                let r = op.call(&[Value::Scalar(v.clone())])?.into_scalar()?;
                if !r.is_zero(&config) {
                    builder.push(i, r);
                }
            }
            builder.close_column();
        }
        Ok(Value::Sparse(builder.finish()))
    })?);
    Ok(sigs)
}

/// Reject non-integer float operands of integer-only kernels.
pub(crate) fn int_operand(name: &'static str, x: f64) -> Result<i64> {
    if !x.is_finite() || x.fract() != 0.0 {
        return Err(NumatError::DomainError(format!(
            "integers expected in function {}, got {}",
            name, x
        )));
    }
    Ok(x as i64)
}
