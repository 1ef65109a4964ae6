//! Relational functions with tolerant float comparison.
//!
//! `Number` comparisons treat values within the configured relative
//! epsilon as equal; exact kinds compare exactly. Complex numbers have no
//! ordering — asking for one is a domain error, not a silent projection.
//! `compare(x, 0)` is zero exactly when the operands are equal, so a
//! sparse comparison keeps its pattern; the boolean predicates produce
//! `true` on equal zeros and densify instead.

use std::cmp::Ordering;
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::config::Config;
use crate::dispatch::{Signature, TypedFn};
use crate::elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, SuiteOptions, ZeroLaws,
    build_suite,
};
use crate::error::{NumatError, Result};
use crate::scalar::Scalar;
use crate::utils::nearly_equal;
use crate::value::Value;

fn domain(msg: impl Into<String>) -> NumatError {
    NumatError::DomainError(msg.into())
}

fn no_complex_ordering() -> NumatError {
    domain("no ordering relation is defined for complex numbers")
}

fn unit_dimensions_check(a: &Value, b: &Value) -> Result<(f64, f64)> {
    let (x, y) = (a.as_unit()?, b.as_unit()?);
    if !x.same_dimension(y) {
        return Err(domain("cannot compare units with different dimensions"));
    }
    Ok((x.value, y.value))
}

fn compare_number(config: &Config, x: f64, y: f64) -> f64 {
    if nearly_equal(x, y, config.epsilon) {
        0.0
    } else if x > y {
        1.0
    } else {
        -1.0
    }
}

/// Three-way comparison: 1, 0, or -1 in the operand's own kind.
pub fn create_compare(config: Config) -> Result<TypedFn> {
    let cfg = config;
    let elop = Arc::new(TypedFn::new(
        "compare",
        vec![
            Signature::new("Number, Number", move |_, a| {
                Ok(Value::number(compare_number(&cfg, a[0].as_number()?, a[1].as_number()?)))
            })?,
            Signature::new("Bool, Bool", |_, a| {
                let (x, y) = (a[0].as_bool()?, a[1].as_bool()?);
                Ok(Value::number(match x.cmp(&y) {
                    Ordering::Less => -1.0,
                    Ordering::Equal => 0.0,
                    Ordering::Greater => 1.0,
                }))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                let cmp = match a[0].as_big()?.cmp(a[1].as_big()?) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                };
                Ok(Value::big(cmp))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                let cmp = match a[0].as_fraction()?.cmp(a[1].as_fraction()?) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                };
                Ok(Value::Scalar(Scalar::Fraction(BigRational::from(BigInt::from(cmp)))))
            })?,
            Signature::new("Complex, Complex", |_, _| Err(no_complex_ordering()))?,
            Signature::new("Unit, Unit", move |_, a| {
                let (x, y) = unit_dimensions_check(&a[0], &a[1])?;
                Ok(Value::number(compare_number(&cfg, x, y)))
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
    Ok(TypedFn::new("compare", sigs))
}

/// Shared wiring for the boolean predicates: `op(0, 0)` is not reliably
/// zero (equality of zeros is true), so every storage pairing computes in
/// full and produces dense results.
fn predicate_suite(
    name: &'static str,
    config: Config,
    elop: Arc<TypedFn>,
) -> Result<TypedFn> {
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::empty(),
        config,
        ss: SparseSparseVariant::Full,
        ds: DenseSparseVariant::Full,
        sd: None,
        sparse_scalar: Some(SparseScalarVariant::Full),
        scalar_sparse: None,
        scalar: None,
    })?;
    Ok(TypedFn::new(name, sigs))
}

/// Tolerant equality across every tower kind of the same type.
pub fn create_equal(config: Config) -> Result<TypedFn> {
    let cfg = config;
    let elop = Arc::new(TypedFn::new(
        "equal",
        vec![
            Signature::new("Unit, Unit", move |_, a| {
                let (x, y) = unit_dimensions_check(&a[0], &a[1])?;
                Ok(Value::boolean(nearly_equal(x, y, cfg.epsilon)))
            })?,
            Signature::new("any, any", move |_, a| {
                Ok(Value::boolean(a[0].as_scalar()?.nearly_equals(a[1].as_scalar()?, &cfg)))
            })?,
        ],
    ));
    predicate_suite("equal", config, elop)
}

/// Negated tolerant equality.
pub fn create_unequal(config: Config) -> Result<TypedFn> {
    let cfg = config;
    let elop = Arc::new(TypedFn::new(
        "unequal",
        vec![
            Signature::new("Unit, Unit", move |_, a| {
                let (x, y) = unit_dimensions_check(&a[0], &a[1])?;
                Ok(Value::boolean(!nearly_equal(x, y, cfg.epsilon)))
            })?,
            Signature::new("any, any", move |_, a| {
                Ok(Value::boolean(!a[0].as_scalar()?.nearly_equals(a[1].as_scalar()?, &cfg)))
            })?,
        ],
    ));
    predicate_suite("unequal", config, elop)
}

/// Ordering kernels for the four inequality predicates. `decide` maps the
/// sign of the comparison (tolerant for floats) onto the predicate.
fn ordering_elop(
    name: &'static str,
    config: Config,
    decide: fn(Ordering) -> bool,
) -> Result<Arc<TypedFn>> {
    let cfg = config;
    Ok(Arc::new(TypedFn::new(
        name,
        vec![
            Signature::new("Number, Number", move |_, a| {
                let (x, y) = (a[0].as_number()?, a[1].as_number()?);
                let ord = if nearly_equal(x, y, cfg.epsilon) {
                    Ordering::Equal
                } else if x < y {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                Ok(Value::boolean(decide(ord)))
            })?,
            Signature::new("BigInt, BigInt", move |_, a| {
                Ok(Value::boolean(decide(a[0].as_big()?.cmp(a[1].as_big()?))))
            })?,
            Signature::new("Fraction, Fraction", move |_, a| {
                Ok(Value::boolean(decide(a[0].as_fraction()?.cmp(a[1].as_fraction()?))))
            })?,
            Signature::new("Complex, Complex", |_, _| Err(no_complex_ordering()))?,
            Signature::new("Unit, Unit", move |_, a| {
                let (x, y) = unit_dimensions_check(&a[0], &a[1])?;
                let ord = if nearly_equal(x, y, cfg.epsilon) {
                    Ordering::Equal
                } else if x < y {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                Ok(Value::boolean(decide(ord)))
            })?,
        ],
    )))
}

/// `x < y` with tolerant float comparison.
pub fn create_smaller(config: Config) -> Result<TypedFn> {
    predicate_suite("smaller", config, ordering_elop("smaller", config, |o| o == Ordering::Less)?)
}

/// `x <= y` with tolerant float comparison.
pub fn create_smaller_eq(config: Config) -> Result<TypedFn> {
    predicate_suite(
        "smallerEq",
        config,
        ordering_elop("smallerEq", config, |o| o != Ordering::Greater)?,
    )
}

/// `x > y` with tolerant float comparison.
pub fn create_larger(config: Config) -> Result<TypedFn> {
    predicate_suite("larger", config, ordering_elop("larger", config, |o| o == Ordering::Greater)?)
}

/// `x >= y` with tolerant float comparison.
pub fn create_larger_eq(config: Config) -> Result<TypedFn> {
    predicate_suite(
        "largerEq",
        config,
        ordering_elop("largerEq", config, |o| o != Ordering::Less)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn compare_is_tolerant_for_numbers() {
        let compare = create_compare(Config::default()).unwrap();
        assert_eq!(
            compare.call(&[Value::number(1.0), Value::number(1.0 + 1e-15)]).unwrap(),
            Value::number(0.0)
        );
        assert_eq!(
            compare.call(&[Value::number(2.0), Value::number(1.0)]).unwrap(),
            Value::number(1.0)
        );
    }

    #[test]
    fn complex_ordering_is_refused() {
        let smaller = create_smaller(Config::default()).unwrap();
        let z = Value::Scalar(Scalar::Complex(Complex64::new(1.0, 1.0)));
        assert!(matches!(
            smaller.call(&[z.clone(), z]).unwrap_err(),
            NumatError::DomainError(_)
        ));
    }

    #[test]
    fn equal_handles_complex_componentwise() {
        let equal = create_equal(Config::default()).unwrap();
        let z = Value::Scalar(Scalar::Complex(Complex64::new(2.0, -1.0)));
        assert_eq!(equal.call(&[z.clone(), z]).unwrap(), Value::boolean(true));
    }

    #[test]
    fn unequal_kinds_are_unequal_not_errors() {
        let equal = create_equal(Config::default()).unwrap();
        assert_eq!(
            equal.call(&[Value::number(1.0), Value::big(1)]).unwrap(),
            Value::boolean(false)
        );
    }
}
