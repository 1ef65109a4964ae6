//! The scalar tower: every concrete numeric representation the engine
//! dispatches over, as one closed enumeration.
//!
//! Kernels receive `Scalar` values and match on the variants they declared
//! signatures for; the dispatcher guarantees they only ever see those.
//! Each kind designates an additive identity (`ScalarKind::zero`), and
//! zero tests go through [`Scalar::is_zero`], which applies a relative
//! tolerance for float-backed kinds and exact equality for the rest.

pub mod unit;
pub use unit::Quantity;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::Zero;

use crate::config::Config;
use crate::utils::approx::nearly_equal;

/// Concrete scalar types supported by the tower.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Number,
    BigInt,
    Fraction,
    Complex,
    Unit,
    Bool,
}

impl ScalarKind {
    /// Type name as used in signature patterns.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Number => "Number",
            ScalarKind::BigInt => "BigInt",
            ScalarKind::Fraction => "Fraction",
            ScalarKind::Complex => "Complex",
            ScalarKind::Unit => "Unit",
            ScalarKind::Bool => "Bool",
        }
    }

    /// The additive identity of this kind.
    pub fn zero(&self) -> Scalar {
        match self {
            ScalarKind::Number => Scalar::Number(0.0),
            ScalarKind::BigInt => Scalar::BigInt(BigInt::zero()),
            ScalarKind::Fraction => Scalar::Fraction(BigRational::zero()),
            ScalarKind::Complex => Scalar::Complex(Complex64::zero()),
            ScalarKind::Unit => Scalar::Unit(Quantity::dimensionless(0.0)),
            ScalarKind::Bool => Scalar::Bool(false),
        }
    }
}

/// A single value of the numeric tower.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Number(f64),
    BigInt(BigInt),
    Fraction(BigRational),
    Complex(Complex64),
    Unit(Quantity),
    Bool(bool),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Number(_) => ScalarKind::Number,
            Scalar::BigInt(_) => ScalarKind::BigInt,
            Scalar::Fraction(_) => ScalarKind::Fraction,
            Scalar::Complex(_) => ScalarKind::Complex,
            Scalar::Unit(_) => ScalarKind::Unit,
            Scalar::Bool(_) => ScalarKind::Bool,
        }
    }

    /// Tolerant test against the kind's zero element.
    ///
    /// Float-backed kinds compare within `config.epsilon`; exact kinds
    /// compare exactly. This is the predicate the sparse traversals use to
    /// decide whether a computed cell may stay implicit.
    pub fn is_zero(&self, config: &Config) -> bool {
        match self {
            Scalar::Number(x) => nearly_equal(*x, 0.0, config.epsilon),
            Scalar::BigInt(x) => x.is_zero(),
            Scalar::Fraction(x) => x.is_zero(),
            Scalar::Complex(z) => {
                nearly_equal(z.re, 0.0, config.epsilon) && nearly_equal(z.im, 0.0, config.epsilon)
            }
            Scalar::Unit(q) => nearly_equal(q.value, 0.0, config.epsilon),
            Scalar::Bool(b) => !*b,
        }
    }

    /// Tolerant same-kind equality. Values of different kinds are never
    /// equal here; promotion is the caller's business, not this layer's.
    pub fn nearly_equals(&self, other: &Scalar, config: &Config) -> bool {
        match (self, other) {
            (Scalar::Number(x), Scalar::Number(y)) => nearly_equal(*x, *y, config.epsilon),
            (Scalar::BigInt(x), Scalar::BigInt(y)) => x == y,
            (Scalar::Fraction(x), Scalar::Fraction(y)) => x == y,
            (Scalar::Complex(x), Scalar::Complex(y)) => {
                nearly_equal(x.re, y.re, config.epsilon) && nearly_equal(x.im, y.im, config.epsilon)
            }
            (Scalar::Unit(x), Scalar::Unit(y)) => {
                x.same_dimension(y) && nearly_equal(x.value, y.value, config.epsilon)
            }
            (Scalar::Bool(x), Scalar::Bool(y)) => x == y,
            _ => false,
        }
    }

    /// Truthiness as used by the logical kernels: nonzero and non-NaN.
    pub fn truthy(&self) -> bool {
        match self {
            Scalar::Number(x) => *x != 0.0 && !x.is_nan(),
            Scalar::BigInt(x) => !x.is_zero(),
            Scalar::Fraction(x) => !x.is_zero(),
            Scalar::Complex(z) => z.re != 0.0 || z.im != 0.0,
            Scalar::Unit(q) => q.value != 0.0 && !q.value.is_nan(),
            Scalar::Bool(b) => *b,
        }
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Number(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<BigInt> for Scalar {
    fn from(x: BigInt) -> Self {
        Scalar::BigInt(x)
    }
}

impl From<BigRational> for Scalar {
    fn from(x: BigRational) -> Self {
        Scalar::Fraction(x)
    }
}

impl From<Complex64> for Scalar {
    fn from(z: Complex64) -> Self {
        Scalar::Complex(z)
    }
}

impl From<Quantity> for Scalar {
    fn from(q: Quantity) -> Self {
        Scalar::Unit(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elements_test_as_zero() {
        let cfg = Config::default();
        for kind in [
            ScalarKind::Number,
            ScalarKind::BigInt,
            ScalarKind::Fraction,
            ScalarKind::Complex,
            ScalarKind::Unit,
            ScalarKind::Bool,
        ] {
            assert!(kind.zero().is_zero(&cfg), "zero of {} not zero", kind.name());
            assert!(!kind.zero().truthy());
        }
    }

    #[test]
    fn float_zero_is_tolerant() {
        let cfg = Config::default();
        assert!(Scalar::Number(1e-17).is_zero(&cfg));
        assert!(!Scalar::Number(0.5).is_zero(&cfg));
    }

    #[test]
    fn cross_kind_never_equal() {
        let cfg = Config::default();
        let a = Scalar::Number(1.0);
        let b = Scalar::BigInt(BigInt::from(1));
        assert!(!a.nearly_equals(&b, &cfg));
    }
}
