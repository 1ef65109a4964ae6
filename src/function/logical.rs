//! Logical functions over scalar truthiness.
//!
//! The kernels accept any pair of tower scalars — truthiness is defined
//! for every kind, so there is nothing to promote. `and` short-circuits a
//! falsy scalar against a sparse operand into an all-implicit result of
//! the same shape without touching a single entry.

use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::{Signature, TypedFn};
use crate::elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, SuiteOptions, ZeroLaws,
    build_suite, dense_scalar, sparse_scalar_zero,
};
use crate::error::Result;
use crate::matrix::{DenseMatrix, SparseMatrix};
use crate::value::Value;

fn truthy_kernel(
    name: &'static str,
    f: fn(bool, bool) -> bool,
) -> Result<Arc<TypedFn>> {
    Ok(Arc::new(TypedFn::new(
        name,
        vec![Signature::new("any, any", move |_, a| {
            Ok(Value::boolean(f(a[0].as_scalar()?.truthy(), a[1].as_scalar()?.truthy())))
        })?],
    )))
}

/// Logical AND. False on either side annihilates, so only cells explicit
/// on both sides can be true.
pub fn create_and(config: Config) -> Result<TypedFn> {
    let elop = truthy_kernel("and", |x, y| x && y)?;
    let mut sigs = build_suite(SuiteOptions {
        elop: elop.clone(),
        laws: ZeroLaws::RIGHT_ANNIHILATES | ZeroLaws::LEFT_ANNIHILATES | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::Intersect,
        ds: DenseSparseVariant::Zero,
        sd: None,
        sparse_scalar: None,
        scalar_sparse: None,
        scalar: None,
    })?;

    // Scalar signatures live outside the suite so a falsy scalar can
    // short-circuit the sparse side to an all-implicit result.
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix, any", move |_, a| {
        let x = a[0].as_sparse()?;
        let y = a[1].as_scalar()?;
        if !y.truthy() {
            let [rows, cols] = x.shape();
            return Ok(Value::Sparse(SparseMatrix::zeros(rows, cols, x.kind())));
        }
        sparse_scalar_zero(x, y, &op, false, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("any, SparseMatrix", move |_, a| {
        let x = a[0].as_scalar()?;
        let y = a[1].as_sparse()?;
        if !x.truthy() {
            let [rows, cols] = y.shape();
            return Ok(Value::Sparse(SparseMatrix::zeros(rows, cols, y.kind())));
        }
        sparse_scalar_zero(y, x, &op, true, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix, any", move |_, a| {
        dense_scalar(a[0].as_dense()?, a[1].as_scalar()?, &op, false)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("any, DenseMatrix", move |_, a| {
        dense_scalar(a[1].as_dense()?, a[0].as_scalar()?, &op, true)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array, any", move |_, a| {
        let x = DenseMatrix::from_array(a[0].as_array()?)?;
        match dense_scalar(&x, a[1].as_scalar()?, &op, false)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("any, Array", move |_, a| {
        let y = DenseMatrix::from_array(a[1].as_array()?)?;
        match dense_scalar(&y, a[0].as_scalar()?, &op, true)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    Ok(TypedFn::new("and", sigs))
}

/// Logical OR. `or(0, 0)` is false, which is the implicit value of a
/// boolean sparse result, so cells absent on both sides stay implicit.
pub fn create_or(config: Config) -> Result<TypedFn> {
    let elop = truthy_kernel("or", |x, y| x || y)?;
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
    Ok(TypedFn::new("or", sigs))
}

/// Logical XOR. Same zero behavior as `or`.
pub fn create_xor(config: Config) -> Result<TypedFn> {
    let elop = truthy_kernel("xor", |x, y| x != y)?;
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
    Ok(TypedFn::new("xor", sigs))
}

/// Logical NOT. `not(0)` is true, so sparse operands densify.
pub fn create_not(_config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "not",
        vec![Signature::new("any", |_, a| Ok(Value::boolean(!a[0].as_scalar()?.truthy())))?],
    ));
    let mut sigs = Vec::new();
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix", move |_, a| {
        let m = a[0].as_dense()?;
        Ok(Value::Dense(m.map(|x| {
            op.call(&[Value::Scalar(x.clone())])?.into_scalar()
        })?))
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix", move |_, a| {
        let m = a[0].as_sparse()?.to_dense();
        Ok(Value::Dense(m.map(|x| {
            op.call(&[Value::Scalar(x.clone())])?.into_scalar()
        })?))
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array", move |_, a| {
        let m = DenseMatrix::from_array(a[0].as_array()?)?;
        Ok(m.map(|x| op.call(&[Value::Scalar(x.clone())])?.into_scalar())?.to_array())
    })?);
    for sig in elop.signatures() {
        sigs.push(sig.clone());
    }
    Ok(TypedFn::new("not", sigs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{Scalar, ScalarKind};

    fn num(x: f64) -> Scalar {
        Scalar::Number(x)
    }

    #[test]
    fn truthiness_across_kinds() {
        let and = create_and(Config::default()).unwrap();
        assert_eq!(
            and.call(&[Value::number(2.0), Value::number(4.0)]).unwrap(),
            Value::boolean(true)
        );
        assert_eq!(
            and.call(&[Value::number(2.0), Value::big(0)]).unwrap(),
            Value::boolean(false)
        );
    }

    #[test]
    fn falsy_scalar_short_circuits_sparse_and() {
        let and = create_and(Config::default()).unwrap();
        let m = SparseMatrix::from_triples(2, 2, ScalarKind::Number, vec![(num(3.0), 0, 0)])
            .unwrap();
        let r = and.call(&[Value::Sparse(m), Value::number(0.0)]).unwrap();
        let Value::Sparse(r) = r else { panic!("expected sparse") };
        assert_eq!(r.nnz(), 0);
    }

    #[test]
    fn not_densifies_sparse() {
        let not = create_not(Config::default()).unwrap();
        let m = SparseMatrix::from_triples(1, 2, ScalarKind::Number, vec![(num(3.0), 0, 0)])
            .unwrap();
        let r = not.call(&[Value::Sparse(m)]).unwrap();
        let Value::Dense(r) = r else { panic!("expected dense") };
        assert_eq!(r.data(), &[Scalar::Bool(false), Scalar::Bool(true)]);
    }
}
