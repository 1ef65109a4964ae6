//! Arithmetic functions lifted elementwise over matrices.
//!
//! Kernels are registered per tower kind, never across kinds — mixing
//! `Number` with `Fraction` is a dispatch error, not a silent promotion.
//! Zero laws are declared next to each suite wiring; the licences they
//! grant are what keeps the sparse traversals from fabricating or
//! dropping cells.

use std::sync::Arc;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{Pow, Signed, ToPrimitive, Zero};

use crate::config::Config;
use crate::dispatch::{Signature, TypedFn};
use crate::elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, SuiteOptions, ZeroLaws,
    build_suite, dense_dense, dense_scalar, dense_sparse_keep, dense_sparse_zero,
    sparse_intersect, sparse_scalar_zero,
};
use crate::error::{NumatError, Result};
use crate::function::{int_operand, unary_matrix_sigs, variadic_reduce};
use crate::matrix::DenseMatrix;
use crate::scalar::{Quantity, Scalar};
use crate::utils::nearly_equal;
use crate::value::Value;

fn domain(msg: impl Into<String>) -> NumatError {
    NumatError::DomainError(msg.into())
}

/// Addition: `x + y`, elementwise over matrices, n-ary over the rest
/// signature.
pub fn create_add(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "add",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()? + a[1].as_number()?))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::Scalar(Scalar::BigInt(a[0].as_big()? + a[1].as_big()?)))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()? + a[1].as_fraction()?)))
            })?,
            Signature::new("Complex, Complex", |_, a| {
                Ok(Value::Scalar(Scalar::Complex(a[0].as_complex()? + a[1].as_complex()?)))
            })?,
            Signature::new("Unit, Unit", |_, a| {
                let (x, y) = (a[0].as_unit()?, a[1].as_unit()?);
                if !x.same_dimension(y) {
                    return Err(domain("cannot add units with different dimensions"));
                }
                Ok(Value::Scalar(Scalar::Unit(Quantity::new(x.value + y.value, x.dims))))
            })?,
        ],
    ));
    let mut sigs = build_suite(SuiteOptions {
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
    sigs.push(variadic_reduce()?);
    Ok(TypedFn::new("add", sigs))
}

/// Subtraction: `x - y`. One-sided sparse cells must run the kernel,
/// since `0 - y` negates.
pub fn create_subtract(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "subtract",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()? - a[1].as_number()?))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::Scalar(Scalar::BigInt(a[0].as_big()? - a[1].as_big()?)))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()? - a[1].as_fraction()?)))
            })?,
            Signature::new("Complex, Complex", |_, a| {
                Ok(Value::Scalar(Scalar::Complex(a[0].as_complex()? - a[1].as_complex()?)))
            })?,
            Signature::new("Unit, Unit", |_, a| {
                let (x, y) = (a[0].as_unit()?, a[1].as_unit()?);
                if !x.same_dimension(y) {
                    return Err(domain("cannot subtract units with different dimensions"));
                }
                Ok(Value::Scalar(Scalar::Unit(Quantity::new(x.value - y.value, x.dims))))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::RIGHT_IDENTITY | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::UnionApply,
        ds: DenseSparseVariant::Keep,
        sd: Some(DenseSparseVariant::Full),
        sparse_scalar: Some(SparseScalarVariant::Full),
        scalar_sparse: Some(SparseScalarVariant::Keep),
        scalar: None,
    })?;
    Ok(TypedFn::new("subtract", sigs))
}

/// Elementwise product: `x .* y`.
///
/// Zero annihilates on both sides, but the left pattern is still walked
/// in full so an explicit `Inf` against an implicit zero surfaces as NaN
/// instead of silently vanishing.
pub fn create_dot_multiply(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "dotMultiply",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()? * a[1].as_number()?))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::Scalar(Scalar::BigInt(a[0].as_big()? * a[1].as_big()?)))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()? * a[1].as_fraction()?)))
            })?,
            Signature::new("Complex, Complex", |_, a| {
                Ok(Value::Scalar(Scalar::Complex(a[0].as_complex()? * a[1].as_complex()?)))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::RIGHT_ANNIHILATES | ZeroLaws::LEFT_ANNIHILATES | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::ApplyLeft,
        ds: DenseSparseVariant::Zero,
        sd: None,
        sparse_scalar: Some(SparseScalarVariant::Zero),
        scalar_sparse: None,
        scalar: None,
    })?;
    Ok(TypedFn::new("dotMultiply", sigs))
}

/// Elementwise quotient: `x ./ y`. `0 / 0` is not zero, so sparse pairs
/// densify.
pub fn create_dot_divide(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "dotDivide",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()? / a[1].as_number()?))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                let (x, y) = (a[0].as_big()?, a[1].as_big()?);
                if y.is_zero() {
                    return Err(domain("division by zero"));
                }
                Ok(Value::Scalar(Scalar::BigInt(x / y)))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                let (x, y) = (a[0].as_fraction()?, a[1].as_fraction()?);
                if y.is_zero() {
                    return Err(domain("division by zero"));
                }
                Ok(Value::Scalar(Scalar::Fraction(x / y)))
            })?,
            Signature::new("Complex, Complex", |_, a| {
                Ok(Value::Scalar(Scalar::Complex(a[0].as_complex()? / a[1].as_complex()?)))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::LEFT_ANNIHILATES,
        config,
        ss: SparseSparseVariant::Full,
        ds: DenseSparseVariant::Full,
        sd: Some(DenseSparseVariant::Zero),
        sparse_scalar: Some(SparseScalarVariant::Zero),
        scalar_sparse: Some(SparseScalarVariant::Full),
        scalar: None,
    })?;
    Ok(TypedFn::new("dotDivide", sigs))
}

/// Elementwise power: `x .^ y`. `0 ^ 0 = 1`, so sparse pairs densify.
pub fn create_dot_pow(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "dotPow",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()?.powf(a[1].as_number()?)))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                let (x, y) = (a[0].as_big()?, a[1].as_big()?);
                let exp = y
                    .to_u32()
                    .ok_or_else(|| domain("exponent must be a non-negative 32-bit integer"))?;
                Ok(Value::Scalar(Scalar::BigInt(Pow::pow(x, exp))))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                let (x, y) = (a[0].as_fraction()?, a[1].as_fraction()?);
                if !y.is_integer() {
                    return Err(domain("exponent must be an integer"));
                }
                let exp = y
                    .numer()
                    .to_i32()
                    .ok_or_else(|| domain("exponent must fit a 32-bit integer"))?;
                if x.is_zero() && exp < 0 {
                    return Err(domain("division by zero"));
                }
                Ok(Value::Scalar(Scalar::Fraction(Pow::pow(x, exp))))
            })?,
            Signature::new("Complex, Complex", |_, a| {
                Ok(Value::Scalar(Scalar::Complex(a[0].as_complex()?.powc(a[1].as_complex()?))))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::LEFT_ANNIHILATES,
        config,
        ss: SparseSparseVariant::Full,
        ds: DenseSparseVariant::Full,
        sd: None,
        sparse_scalar: Some(SparseScalarVariant::Zero),
        scalar_sparse: Some(SparseScalarVariant::Full),
        scalar: None,
    })?;
    Ok(TypedFn::new("dotPow", sigs))
}

fn mod_number(x: f64, y: f64) -> Result<f64> {
    if y > 0.0 {
        Ok(x - y * (x / y).floor())
    } else if y == 0.0 {
        Ok(x)
    } else {
        Err(domain("cannot calculate mod for a negative divisor"))
    }
}

/// Modulus `x - y * floor(x / y)`; a zero divisor returns the dividend.
pub fn create_modulo(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "mod",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(mod_number(a[0].as_number()?, a[1].as_number()?)?))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                let (x, y) = (a[0].as_big()?, a[1].as_big()?);
                if y.is_negative() {
                    return Err(domain("cannot calculate mod for a negative divisor"));
                }
                if y.is_zero() {
                    return Ok(Value::Scalar(Scalar::BigInt(x.clone())));
                }
                Ok(Value::Scalar(Scalar::BigInt(((x % y) + y) % y)))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                let (x, y) = (a[0].as_fraction()?, a[1].as_fraction()?);
                if y.is_negative() {
                    return Err(domain("cannot calculate mod for a negative divisor"));
                }
                if y.is_zero() {
                    return Ok(Value::Scalar(Scalar::Fraction(x.clone())));
                }
                Ok(Value::Scalar(Scalar::Fraction(x - y * (x / y).floor())))
            })?,
        ],
    ));
    let sigs = build_suite(SuiteOptions {
        elop,
        laws: ZeroLaws::LEFT_ANNIHILATES | ZeroLaws::ZERO_FIXED,
        config,
        ss: SparseSparseVariant::UnionApply,
        ds: DenseSparseVariant::Full,
        sd: Some(DenseSparseVariant::Zero),
        sparse_scalar: Some(SparseScalarVariant::Zero),
        scalar_sparse: Some(SparseScalarVariant::Full),
        scalar: None,
    })?;
    Ok(TypedFn::new("mod", sigs))
}

fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

fn gcd_big(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn lcm_big(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    ((a * b) / gcd_big(a, b)).abs()
}

/// Greatest common divisor, n-ary over the rest signature. `gcd(x, 0)`
/// and `gcd(0, y)` pass the other operand through, so one-sided sparse
/// entries are kept verbatim.
pub fn create_gcd(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "gcd",
        vec![
            Signature::new("Number, Number", |_, a| {
                let x = int_operand("gcd", a[0].as_number()?)?;
                let y = int_operand("gcd", a[1].as_number()?)?;
                Ok(Value::number(gcd_i64(x, y) as f64))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::Scalar(Scalar::BigInt(gcd_big(a[0].as_big()?, a[1].as_big()?))))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                let (x, y) = (a[0].as_fraction()?, a[1].as_fraction()?);
                // gcd of rationals: gcd of numerators over lcm of denominators
                let numer = gcd_big(x.numer(), y.numer());
                let denom = lcm_big(x.denom(), y.denom());
                Ok(Value::Scalar(Scalar::Fraction(BigRational::new(numer, denom))))
            })?,
        ],
    ));
    let mut sigs = build_suite(SuiteOptions {
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
    sigs.push(variadic_reduce()?);
    Ok(TypedFn::new("gcd", sigs))
}

/// Least common multiple, n-ary over the rest signature. Zero on either
/// side annihilates, so only cells explicit on both sides survive.
pub fn create_lcm(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "lcm",
        vec![
            Signature::new("Number, Number", |_, a| {
                let x = int_operand("lcm", a[0].as_number()?)?;
                let y = int_operand("lcm", a[1].as_number()?)?;
                if x == 0 || y == 0 {
                    return Ok(Value::number(0.0));
                }
                Ok(Value::number(((x / gcd_i64(x, y)) * y).abs() as f64))
            })?,
            Signature::new("BigInt, BigInt", |_, a| {
                Ok(Value::Scalar(Scalar::BigInt(lcm_big(a[0].as_big()?, a[1].as_big()?))))
            })?,
            Signature::new("Fraction, Fraction", |_, a| {
                let (x, y) = (a[0].as_fraction()?, a[1].as_fraction()?);
                let numer = lcm_big(x.numer(), y.numer());
                if numer.is_zero() {
                    return Ok(Value::Scalar(Scalar::Fraction(BigRational::zero())));
                }
                let denom = gcd_big(x.denom(), y.denom());
                Ok(Value::Scalar(Scalar::Fraction(BigRational::new(numer, denom))))
            })?,
        ],
    ));
    let mut sigs = build_suite(SuiteOptions {
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
    sigs.push(variadic_reduce()?);
    Ok(TypedFn::new("lcm", sigs))
}

fn nth_root_number(a: f64, root: f64) -> Result<f64> {
    let inverse = root < 0.0;
    let root = root.abs();
    if root == 0.0 {
        return Err(domain("root must be non-zero"));
    }
    if a < 0.0 && (root.fract() != 0.0 || root as i64 % 2 != 1) {
        return Err(domain("root must be odd when a is negative"));
    }
    let x = if a < 0.0 { -(-a).powf(1.0 / root) } else { a.powf(1.0 / root) };
    Ok(if inverse { 1.0 / x } else { x })
}

/// `nth_root(a, root)`, defaulting to the square root.
///
/// The sparse signatures guard against implicit zeros in the root
/// operand: a zero root is a domain error, so a root matrix must have
/// density one before any skip-based traversal may run.
pub fn create_nth_root(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "nthRoot",
        vec![
            Signature::new("Number", |_, a| {
                Ok(Value::number(nth_root_number(a[0].as_number()?, 2.0)?))
            })?,
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(nth_root_number(a[0].as_number()?, a[1].as_number()?)?))
            })?,
        ],
    ));

    fn full_density_guard(density: f64) -> Result<()> {
        if density < 1.0 {
            return Err(domain("root must be non-zero"));
        }
        Ok(())
    }

    let mut sigs = Vec::new();
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix, DenseMatrix", move |_, a| {
        dense_dense(a[0].as_dense()?, a[1].as_dense()?, &op)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array, Array", move |_, a| {
        let x = DenseMatrix::from_array(a[0].as_array()?)?;
        let y = DenseMatrix::from_array(a[1].as_array()?)?;
        match dense_dense(&x, &y, &op)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array, DenseMatrix", move |_, a| {
        dense_dense(&DenseMatrix::from_array(a[0].as_array()?)?, a[1].as_dense()?, &op)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix, Array", move |_, a| {
        dense_dense(a[0].as_dense()?, &DenseMatrix::from_array(a[1].as_array()?)?, &op)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix, SparseMatrix", move |_, a| {
        let y = a[1].as_sparse()?;
        full_density_guard(y.density())?;
        sparse_intersect(a[0].as_sparse()?, y, &op, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix, SparseMatrix", move |_, a| {
        let y = a[1].as_sparse()?;
        full_density_guard(y.density())?;
        dense_sparse_keep(a[0].as_dense()?, y, &op, false)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix, DenseMatrix", move |_, a| {
        dense_sparse_zero(a[1].as_dense()?, a[0].as_sparse()?, &op, true, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix, Number", move |_, a| {
        sparse_scalar_zero(a[0].as_sparse()?, a[1].as_scalar()?, &op, false, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix, Number", move |_, a| {
        dense_scalar(a[0].as_dense()?, a[1].as_scalar()?, &op, false)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array, Number", move |_, a| {
        match dense_scalar(&DenseMatrix::from_array(a[0].as_array()?)?, a[1].as_scalar()?, &op, false)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Number, SparseMatrix", move |_, a| {
        let y = a[1].as_sparse()?;
        full_density_guard(y.density())?;
        sparse_scalar_zero(y, a[0].as_scalar()?, &op, true, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Number, DenseMatrix", move |_, a| {
        dense_scalar(a[1].as_dense()?, a[0].as_scalar()?, &op, true)
    })?);
    // unary matrix forms take the default square root
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix", move |_, a| {
        dense_scalar(a[0].as_dense()?, &Scalar::Number(2.0), &op, false)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix", move |_, a| {
        sparse_scalar_zero(a[0].as_sparse()?, &Scalar::Number(2.0), &op, false, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array", move |_, a| {
        match dense_scalar(&DenseMatrix::from_array(a[0].as_array()?)?, &Scalar::Number(2.0), &op, false)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    for sig in elop.signatures() {
        sigs.push(sig.clone());
    }
    Ok(TypedFn::new("nthRoot", sigs))
}

// Rounding family. The float kernels snap to the nearest integer first
// when it is within the configured tolerance, so 3.0000000000000004
// floors to 3 rather than falling through.

fn round_digits(x: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (x * factor).round() / factor
}

fn ceil_number(config: &Config, x: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let scaled = x * factor;
    if nearly_equal(scaled, scaled.round(), config.epsilon) {
        scaled.round() / factor
    } else {
        scaled.ceil() / factor
    }
}

fn floor_number(config: &Config, x: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let scaled = x * factor;
    if nearly_equal(scaled, scaled.round(), config.epsilon) {
        scaled.round() / factor
    } else {
        scaled.floor() / factor
    }
}

fn digits_arg(name: &'static str, a: &Value) -> Result<i32> {
    let n = int_operand(name, a.as_number()?)?;
    i32::try_from(n).map_err(|_| domain("number of decimals must fit a 32-bit integer"))
}

/// Broadcast signatures for the `(matrix, decimals)` forms of the
/// rounding family. All three kernels fix zero, so sparse operands keep
/// their pattern.
fn rounding_matrix_sigs(elop: &Arc<TypedFn>, config: Config) -> Result<Vec<Signature>> {
    let mut sigs = unary_matrix_sigs(elop, config)?;
    let op = elop.clone();
    sigs.push(Signature::new("DenseMatrix, Number", move |_, a| {
        dense_scalar(a[0].as_dense()?, a[1].as_scalar()?, &op, false)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("SparseMatrix, Number", move |_, a| {
        sparse_scalar_zero(a[0].as_sparse()?, a[1].as_scalar()?, &op, false, &config)
    })?);
    let op = elop.clone();
    sigs.push(Signature::new("Array, Number", move |_, a| {
        match dense_scalar(&DenseMatrix::from_array(a[0].as_array()?)?, a[1].as_scalar()?, &op, false)? {
            Value::Dense(m) => Ok(m.to_array()),
            other => Ok(other),
        }
    })?);
    Ok(sigs)
}

/// Ceiling, optionally to a number of decimals.
pub fn create_ceil(config: Config) -> Result<TypedFn> {
    let cfg = config;
    let elop = Arc::new(TypedFn::new(
        "ceil",
        vec![
            Signature::new("Number", move |_, a| {
                Ok(Value::number(ceil_number(&cfg, a[0].as_number()?, 0)))
            })?,
            Signature::new("Number, Number", move |_, a| {
                Ok(Value::number(ceil_number(&cfg, a[0].as_number()?, digits_arg("ceil", &a[1])?)))
            })?,
            Signature::new("BigInt", |_, a| Ok(a[0].clone()))?,
            Signature::new("Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()?.ceil())))
            })?,
            Signature::new("Complex", move |_, a| {
                let z = a[0].as_complex()?;
                Ok(Value::Scalar(Scalar::Complex(Complex64::new(
                    ceil_number(&cfg, z.re, 0),
                    ceil_number(&cfg, z.im, 0),
                ))))
            })?,
        ],
    ));
    let mut sigs = rounding_matrix_sigs(&elop, config)?;
    for sig in elop.signatures() {
        sigs.push(sig.clone());
    }
    Ok(TypedFn::new("ceil", sigs))
}

/// Floor, optionally to a number of decimals.
pub fn create_floor(config: Config) -> Result<TypedFn> {
    let cfg = config;
    let elop = Arc::new(TypedFn::new(
        "floor",
        vec![
            Signature::new("Number", move |_, a| {
                Ok(Value::number(floor_number(&cfg, a[0].as_number()?, 0)))
            })?,
            Signature::new("Number, Number", move |_, a| {
                Ok(Value::number(floor_number(&cfg, a[0].as_number()?, digits_arg("floor", &a[1])?)))
            })?,
            Signature::new("BigInt", |_, a| Ok(a[0].clone()))?,
            Signature::new("Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()?.floor())))
            })?,
            Signature::new("Complex", move |_, a| {
                let z = a[0].as_complex()?;
                Ok(Value::Scalar(Scalar::Complex(Complex64::new(
                    floor_number(&cfg, z.re, 0),
                    floor_number(&cfg, z.im, 0),
                ))))
            })?,
        ],
    ));
    let mut sigs = rounding_matrix_sigs(&elop, config)?;
    for sig in elop.signatures() {
        sigs.push(sig.clone());
    }
    Ok(TypedFn::new("floor", sigs))
}

/// Round half away from zero, optionally to a number of decimals.
pub fn create_round(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "round",
        vec![
            Signature::new("Number", |_, a| Ok(Value::number(a[0].as_number()?.round())))?,
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(round_digits(a[0].as_number()?, digits_arg("round", &a[1])?)))
            })?,
            Signature::new("BigInt", |_, a| Ok(a[0].clone()))?,
            Signature::new("Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()?.round())))
            })?,
            Signature::new("Complex", |_, a| {
                let z = a[0].as_complex()?;
                Ok(Value::Scalar(Scalar::Complex(Complex64::new(z.re.round(), z.im.round()))))
            })?,
        ],
    ));
    let mut sigs = rounding_matrix_sigs(&elop, config)?;
    for sig in elop.signatures() {
        sigs.push(sig.clone());
    }
    Ok(TypedFn::new("round", sigs))
}

/// Sign: -1, 0, or 1 in the operand's own kind; `z / |z|` for complex.
pub fn create_sign(config: Config) -> Result<TypedFn> {
    let elop = Arc::new(TypedFn::new(
        "sign",
        vec![
            Signature::new("Number", |_, a| {
                let x = a[0].as_number()?;
                Ok(Value::number(if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    -1.0
                } else {
                    x
                }))
            })?,
            Signature::new("BigInt", |_, a| {
                Ok(Value::Scalar(Scalar::BigInt(a[0].as_big()?.signum())))
            })?,
            Signature::new("Fraction", |_, a| {
                Ok(Value::Scalar(Scalar::Fraction(a[0].as_fraction()?.signum())))
            })?,
            Signature::new("Complex", |_, a| {
                let z = a[0].as_complex()?;
                let sign = if z.norm() == 0.0 { Complex64::zero() } else { z / z.norm() };
                Ok(Value::Scalar(Scalar::Complex(sign)))
            })?,
        ],
    ));
    let mut sigs = unary_matrix_sigs(&elop, config)?;
    for sig in elop.signatures() {
        sigs.push(sig.clone());
    }
    Ok(TypedFn::new("sign", sigs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SparseMatrix;
    use crate::scalar::ScalarKind;

    fn num(x: f64) -> Scalar {
        Scalar::Number(x)
    }

    #[test]
    fn add_numbers_and_fractions() {
        let add = create_add(Config::default()).unwrap();
        assert_eq!(
            add.call(&[Value::number(2.0), Value::number(3.0)]).unwrap(),
            Value::number(5.0)
        );
        let half = BigRational::new(BigInt::from(1), BigInt::from(2));
        let third = BigRational::new(BigInt::from(1), BigInt::from(3));
        let r = add
            .call(&[
                Value::Scalar(Scalar::Fraction(half)),
                Value::Scalar(Scalar::Fraction(third)),
            ])
            .unwrap();
        let expected = BigRational::new(BigInt::from(5), BigInt::from(6));
        assert_eq!(r, Value::Scalar(Scalar::Fraction(expected)));
    }

    #[test]
    fn add_is_n_ary() {
        let add = create_add(Config::default()).unwrap();
        let r = add
            .call(&[Value::number(1.0), Value::number(2.0), Value::number(3.0), Value::number(4.0)])
            .unwrap();
        assert_eq!(r, Value::number(10.0));
    }

    #[test]
    fn mixed_kinds_do_not_promote() {
        let add = create_add(Config::default()).unwrap();
        let err = add
            .call(&[Value::number(1.0), Value::big(1)])
            .unwrap_err();
        assert!(matches!(err, NumatError::NoMatchingSignature { .. }));
    }

    #[test]
    fn unit_addition_requires_matching_dimensions() {
        let add = create_add(Config::default()).unwrap();
        let m = Value::Scalar(Scalar::Unit(Quantity::length(2.0)));
        let s = Value::Scalar(Scalar::Unit(Quantity::time(1.0)));
        assert!(add.call(&[m.clone(), m.clone()]).is_ok());
        assert!(matches!(
            add.call(&[m, s]).unwrap_err(),
            NumatError::DomainError(_)
        ));
    }

    #[test]
    fn mod_rejects_negative_divisor() {
        let modulo = create_modulo(Config::default()).unwrap();
        assert_eq!(
            modulo.call(&[Value::number(8.0), Value::number(3.0)]).unwrap(),
            Value::number(2.0)
        );
        assert_eq!(
            modulo.call(&[Value::number(-5.0), Value::number(3.0)]).unwrap(),
            Value::number(1.0)
        );
        assert!(matches!(
            modulo.call(&[Value::number(8.0), Value::number(-3.0)]).unwrap_err(),
            NumatError::DomainError(_)
        ));
    }

    #[test]
    fn gcd_and_lcm_scalars() {
        let gcd = create_gcd(Config::default()).unwrap();
        let lcm = create_lcm(Config::default()).unwrap();
        assert_eq!(
            gcd.call(&[Value::number(12.0), Value::number(8.0)]).unwrap(),
            Value::number(4.0)
        );
        assert_eq!(
            gcd.call(&[Value::number(25.0), Value::number(15.0), Value::number(10.0)]).unwrap(),
            Value::number(5.0)
        );
        assert_eq!(
            lcm.call(&[Value::number(4.0), Value::number(6.0)]).unwrap(),
            Value::number(12.0)
        );
        assert!(gcd.call(&[Value::number(0.5), Value::number(2.0)]).is_err());
    }

    #[test]
    fn nth_root_scalars() {
        let nth_root = create_nth_root(Config::default()).unwrap();
        assert_eq!(
            nth_root.call(&[Value::number(64.0), Value::number(3.0)]).unwrap(),
            Value::number(4.0)
        );
        assert_eq!(nth_root.call(&[Value::number(9.0)]).unwrap(), Value::number(3.0));
        assert!(nth_root.call(&[Value::number(9.0), Value::number(0.0)]).is_err());
        assert!(nth_root.call(&[Value::number(-8.0), Value::number(2.0)]).is_err());
        assert_eq!(
            nth_root.call(&[Value::number(-8.0), Value::number(3.0)]).unwrap(),
            Value::number(-2.0)
        );
    }

    #[test]
    fn nth_root_guards_implicit_zero_roots() {
        let nth_root = create_nth_root(Config::default()).unwrap();
        let base = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(num(16.0), 0, 0), (num(81.0), 1, 1)],
        )
        .unwrap();
        // root matrix with an implicit zero: refused
        let sparse_root = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(num(2.0), 0, 0), (num(4.0), 1, 1)],
        )
        .unwrap();
        assert!(
            nth_root
                .call(&[Value::Sparse(base.clone()), Value::Sparse(sparse_root)])
                .is_err()
        );
        // full-density root matrix: allowed
        let full_root = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(num(2.0), 0, 0), (num(2.0), 0, 1), (num(2.0), 1, 0), (num(4.0), 1, 1)],
        )
        .unwrap();
        let r = nth_root
            .call(&[Value::Sparse(base), Value::Sparse(full_root)])
            .unwrap();
        let Value::Sparse(r) = r else { panic!("expected sparse") };
        assert_eq!(r.get(0, 0), Some(&num(4.0)));
        assert_eq!(r.get(1, 1), Some(&num(3.0)));
    }

    #[test]
    fn ceil_snaps_within_tolerance() {
        let ceil = create_ceil(Config::default()).unwrap();
        assert_eq!(
            ceil.call(&[Value::number(3.0000000000000004)]).unwrap(),
            Value::number(3.0)
        );
        assert_eq!(ceil.call(&[Value::number(3.2)]).unwrap(), Value::number(4.0));
        assert_eq!(
            ceil.call(&[Value::number(3.21), Value::number(1.0)]).unwrap(),
            Value::number(3.3)
        );
    }

    #[test]
    fn sign_kinds() {
        let sign = create_sign(Config::default()).unwrap();
        assert_eq!(sign.call(&[Value::number(-3.5)]).unwrap(), Value::number(-1.0));
        assert_eq!(sign.call(&[Value::number(0.0)]).unwrap(), Value::number(0.0));
        assert_eq!(
            sign.call(&[Value::big(-7)]).unwrap(),
            Value::Scalar(Scalar::BigInt(BigInt::from(-1)))
        );
    }
}
