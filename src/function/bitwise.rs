//! Bitwise functions over integer-valued numbers and big integers.
//!
//! Float operands must be integral; the kernels reject anything else
//! before the operation runs. The shift functions add scalar signatures
//! outside the suite: a shift by zero returns a defensive copy of the
//! matrix operand, and shifting a zero scalar across a sparse matrix
//! short-circuits to an all-implicit result.

use std::sync::Arc;

use num_traits::ToPrimitive;

use crate::config::Config;
use crate::dispatch::{Signature, TypedFn};
use crate::elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, SuiteOptions, ZeroLaws,
    build_suite, dense_scalar, sparse_scalar_keep, sparse_scalar_zero,
};
use crate::error::{NumatError, Result};
use crate::function::int_operand;
use crate::matrix::{DenseMatrix, SparseMatrix};
use crate::value::Value;

fn domain(msg: impl Into<String>) -> NumatError {
    NumatError::DomainError(msg.into())
}

fn shift_count(name: &'static str, y: f64) -> Result<u32> {
    let y = int_operand(name, y)?;
    u32::try_from(y).map_err(|_| domain(format!("shift amount must be non-negative in {}", name)))
}

/// Bitwise AND: `x & y`. Zero annihilates on both sides.
pub fn create_bit_and(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "bitAnd",
        vec![
            Signature::new("Number, Number", |_, a| {
                let x = int_operand("bitAnd", a[0].as_number()?)?;
                let y = int_operand("bitAnd", a[1].as_number()?)?;
                Ok(Value::number((x & y) as f64))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::big(a[0].as_big()? & a[1].as_big()?))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::RIGHT_ANNIHILATES | ZeroLaws::LEFT_ANNIHILATES | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::Intersect,
        ds: DenseSparseVariant::Zero,
        sd: None,
        sparse_scalar: Some(SparseScalarVariant::Zero),
        scalar_sparse: None,
        scalar: None,
    })?;
    Ok(TypedFn::new("bitAnd", sigs))
}

/// Bitwise OR: `x | y`. Zero is the identity on both sides, so one-sided
/// sparse entries carry over verbatim.
pub fn create_bit_or(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "bitOr",
        vec![
            Signature::new("Number, Number", |_, a| {
                let x = int_operand("bitOr", a[0].as_number()?)?;
                let y = int_operand("bitOr", a[1].as_number()?)?;
                Ok(Value::number((x | y) as f64))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::big(a[0].as_big()? | a[1].as_big()?))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::RIGHT_IDENTITY | ZeroLaws::LEFT_IDENTITY | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::UnionKeep,
        ds: DenseSparseVariant::Keep,
        sd: None,
        sparse_scalar: Some(SparseScalarVariant::Keep),
        scalar_sparse: None,
        scalar: None,
    })?;
    Ok(TypedFn::new("bitOr", sigs))
}

/// Bitwise XOR: `x ^ y`. Zero fixes zero, so cells absent on both sides
/// stay implicit, but one-sided entries still run the kernel to validate
/// their operand.
pub fn create_bit_xor(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "bitXor",
        vec![
            Signature::new("Number, Number", |_, a| {
                let x = int_operand("bitXor", a[0].as_number()?)?;
                let y = int_operand("bitXor", a[1].as_number()?)?;
                Ok(Value::number((x ^ y) as f64))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::big(a[0].as_big()? ^ a[1].as_big()?))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::UnionApply,
        ds: DenseSparseVariant::Full,
        sd: None,
        sparse_scalar: Some(SparseScalarVariant::Full),
        scalar_sparse: None,
        scalar: None,
    })?;
    Ok(TypedFn::new("bitXor", sigs))
}

/// Scalar signatures shared by both shift functions: shift-by-zero
/// returns a defensive copy, a zero scalar shifted across a sparse matrix
/// short-circuits to an all-implicit result of the same shape.
fn shift_scalar_sigs(
    elop: &Arc<TypedFn>,
    scalar: &'static str,
    config: Config,
) -> Result<Vec<Signature>> {
    let mut sigs = Vec::new();
    let op = elop.clone();
    sigs.push(Signature::new(&format!("SparseMatrix, {}", scalar), move |_, a| {
        let x = a[0].as_sparse()?;
        let y = a[1].as_scalar()?;
        if y.is_zero(&config) {
            return Ok(Value::Sparse(x.clone()));
        }
        sparse_scalar_zero(x, y, &op, false, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new(&format!("DenseMatrix, {}", scalar), move |_, a| {
        let x = a[0].as_dense()?;
        let y = a[1].as_scalar()?;
        if y.is_zero(&config) {
            return Ok(Value::Dense(x.clone()));
        }
        dense_scalar(x, y, &op, false)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new(&format!("Array, {}", scalar), move |_, a| {
        let x = DenseMatrix::from_array(a[0].as_array()?)?;
        let y = a[1].as_scalar()?;
        if y.is_zero(&config) {
            return Ok(x.to_array());
        }
        match dense_scalar(&x, y, &op, false)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    let op = elop.clone();
    sigs.push(Signature::new(&format!("{}, SparseMatrix", scalar), move |_, a| {
        let x = a[0].as_scalar()?;
        let y = a[1].as_sparse()?;
        if x.is_zero(&config) {
            let [rows, cols] = y.shape();
            return Ok(Value::Sparse(SparseMatrix::zeros(rows, cols, y.kind())));
        }
        sparse_scalar_keep(y, x, &op, true)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new(&format!("{}, DenseMatrix", scalar), move |_, a| {
        dense_scalar(a[1].as_dense()?, a[0].as_scalar()?, &op, true)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new(&format!("{}, Array", scalar), move |_, a| {
        let y = DenseMatrix::from_array(a[1].as_array()?)?;
        match dense_scalar(&y, a[0].as_scalar()?, &op, true)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    Ok(sigs)
}

fn shift_suite(
    elop: Arc<TypedFn>,
    scalar: &'static str,
    config: Config,
) -> Result<Vec<Signature>> {
    let mut sigs = build_suite(SuiteOptions {
        elop: elop.clone(),
        laws: ZeroLaws::RIGHT_IDENTITY | ZeroLaws::LEFT_ANNIHILATES | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::KeepLeft,
        ds: DenseSparseVariant::Keep,
        sd: Some(DenseSparseVariant::Zero),
        sparse_scalar: None,
        scalar_sparse: None,
        scalar: None,
    })?;
    sigs.extend(shift_scalar_sigs(&elop, scalar, config)?);
    Ok(sigs)
}

/// Arithmetic (sign-preserving) right shift: `x >> y`.
pub fn create_right_arith_shift(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "rightArithShift",
        vec![
            Signature::new("Number, Number", |_, a| {
                let x = int_operand("rightArithShift", a[0].as_number()?)?;
                let y = shift_count("rightArithShift", a[1].as_number()?)?;
                Ok(Value::number((x >> y.min(63)) as f64))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                let x = a[0].as_big()?;
                let y = a[1]
                    .as_big()?
                    .to_usize()
                    .ok_or_else(|| domain("shift amount must be a non-negative integer"))?;
                Ok(Value::big(x >> y))
            })?,
        ],
    ));
    Ok(TypedFn::new(
        "rightArithShift",
        shift_suite(elop, "Number | BigInt", config)?,
    ))
}

/// Logical (zero-filling) right shift over 32-bit words: `x >>> y`.
pub fn create_right_log_shift(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "rightLogShift",
        vec![Signature::new("Number, Number", |_, a| {
            let x = int_operand("rightLogShift", a[0].as_number()?)?;
            let y = shift_count("rightLogShift", a[1].as_number()?)?;
            let word = x as i32 as u32;
            Ok(Value::number((word >> (y & 31)) as f64))
        })?],
    ));
    Ok(TypedFn::new(
        "rightLogShift",
        shift_suite(elop, "Number", config)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{Scalar, ScalarKind};

    fn num(x: f64) -> Scalar {
        Scalar::Number(x)
    }

    #[test]
    fn integer_checks() {
        let band = create_bit_and(Config::default()).unwrap();
        assert_eq!(
            band.call(&[Value::number(12.0), Value::number(10.0)]).unwrap(),
            Value::number(8.0)
        );
        assert!(band.call(&[Value::number(1.5), Value::number(2.0)]).is_err());
    }

    #[test]
    fn arithmetic_shift_keeps_sign() {
        let shift = create_right_arith_shift(Config::default()).unwrap();
        assert_eq!(
            shift.call(&[Value::number(-32.0), Value::number(4.0)]).unwrap(),
            Value::number(-2.0)
        );
    }

    #[test]
    fn logical_shift_zero_fills() {
        let shift = create_right_log_shift(Config::default()).unwrap();
        assert_eq!(
            shift.call(&[Value::number(-1.0), Value::number(28.0)]).unwrap(),
            Value::number(15.0)
        );
    }

    #[test]
    fn shift_by_zero_is_a_defensive_copy() {
        let shift = create_right_arith_shift(Config::default()).unwrap();
        let m = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(num(16.0), 0, 0), (num(-32.0), 1, 1)],
        )
        .unwrap();
        let r = shift
            .call(&[Value::Sparse(m.clone()), Value::number(0.0)])
            .unwrap();
        assert_eq!(r, Value::Sparse(m));
    }

    #[test]
    fn zero_scalar_across_sparse_short_circuits() {
        let shift = create_right_arith_shift(Config::default()).unwrap();
        let m = SparseMatrix::from_triples(2, 2, ScalarKind::Number, vec![(num(3.0), 0, 1)])
            .unwrap();
        let r = shift.call(&[Value::number(0.0), Value::Sparse(m)]).unwrap();
        let Value::Sparse(r) = r else { panic!("expected sparse") };
        assert_eq!(r.nnz(), 0);
        assert_eq!(r.shape(), [2, 2]);
    }
}
