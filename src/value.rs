//! Runtime values: tower scalars plus the three collection storages.
//!
//! `ValueKind` is the closed set of type tags the dispatcher constrains
//! over; `Value` carries the payloads. Array values are nested literals
//! (as produced by user code), distinct from `DenseMatrix` so signatures
//! can route them through a conversion first.

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;

use crate::error::{NumatError, Result};
use crate::matrix::{DenseMatrix, SparseMatrix};
use crate::scalar::{Quantity, Scalar, ScalarKind};

/// Type tag of a runtime value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    BigInt,
    Fraction,
    Complex,
    Unit,
    Bool,
    Array,
    Dense,
    Sparse,
}

impl ValueKind {
    /// Name as written in signature patterns.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Number => "Number",
            ValueKind::BigInt => "BigInt",
            ValueKind::Fraction => "Fraction",
            ValueKind::Complex => "Complex",
            ValueKind::Unit => "Unit",
            ValueKind::Bool => "Bool",
            ValueKind::Array => "Array",
            ValueKind::Dense => "DenseMatrix",
            ValueKind::Sparse => "SparseMatrix",
        }
    }

    /// Inverse of [`ValueKind::name`].
    pub fn parse(name: &str) -> Option<ValueKind> {
        match name {
            "Number" => Some(ValueKind::Number),
            "BigInt" => Some(ValueKind::BigInt),
            "Fraction" => Some(ValueKind::Fraction),
            "Complex" => Some(ValueKind::Complex),
            "Unit" => Some(ValueKind::Unit),
            "Bool" => Some(ValueKind::Bool),
            "Array" => Some(ValueKind::Array),
            "DenseMatrix" => Some(ValueKind::Dense),
            "SparseMatrix" => Some(ValueKind::Sparse),
            _ => None,
        }
    }

    pub fn of_scalar(kind: ScalarKind) -> ValueKind {
        match kind {
            ScalarKind::Number => ValueKind::Number,
            ScalarKind::BigInt => ValueKind::BigInt,
            ScalarKind::Fraction => ValueKind::Fraction,
            ScalarKind::Complex => ValueKind::Complex,
            ScalarKind::Unit => ValueKind::Unit,
            ScalarKind::Bool => ValueKind::Bool,
        }
    }
}

/// A runtime value as passed between dispatcher, traversals, and kernels.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Array(Vec<Value>),
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(s) => ValueKind::of_scalar(s.kind()),
            Value::Array(_) => ValueKind::Array,
            Value::Dense(_) => ValueKind::Dense,
            Value::Sparse(_) => ValueKind::Sparse,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn number(x: f64) -> Value {
        Value::Scalar(Scalar::Number(x))
    }

    pub fn boolean(b: bool) -> Value {
        Value::Scalar(Scalar::Bool(b))
    }

    pub fn big(x: impl Into<BigInt>) -> Value {
        Value::Scalar(Scalar::BigInt(x.into()))
    }

    fn expected(&self, what: &str) -> NumatError {
        NumatError::DomainError(format!("expected {}, got {}", what, self.type_name()))
    }

    pub fn as_scalar(&self) -> Result<&Scalar> {
        match self {
            Value::Scalar(s) => Ok(s),
            other => Err(other.expected("a scalar")),
        }
    }

    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Scalar(Scalar::Number(x)) => Ok(*x),
            other => Err(other.expected("Number")),
        }
    }

    pub fn as_big(&self) -> Result<&BigInt> {
        match self {
            Value::Scalar(Scalar::BigInt(x)) => Ok(x),
            other => Err(other.expected("BigInt")),
        }
    }

    pub fn as_fraction(&self) -> Result<&BigRational> {
        match self {
            Value::Scalar(Scalar::Fraction(x)) => Ok(x),
            other => Err(other.expected("Fraction")),
        }
    }

    pub fn as_complex(&self) -> Result<Complex64> {
        match self {
            Value::Scalar(Scalar::Complex(z)) => Ok(*z),
            other => Err(other.expected("Complex")),
        }
    }

    pub fn as_unit(&self) -> Result<&Quantity> {
        match self {
            Value::Scalar(Scalar::Unit(q)) => Ok(q),
            other => Err(other.expected("Unit")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Scalar(Scalar::Bool(b)) => Ok(*b),
            other => Err(other.expected("Bool")),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.expected("Array")),
        }
    }

    pub fn as_dense(&self) -> Result<&DenseMatrix> {
        match self {
            Value::Dense(m) => Ok(m),
            other => Err(other.expected("DenseMatrix")),
        }
    }

    pub fn as_sparse(&self) -> Result<&SparseMatrix> {
        match self {
            Value::Sparse(m) => Ok(m),
            other => Err(other.expected("SparseMatrix")),
        }
    }

    /// Unwrap a kernel result into a scalar element.
    pub fn into_scalar(self) -> Result<Scalar> {
        match self {
            Value::Scalar(s) => Ok(s),
            other => Err(other.expected("a scalar")),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<DenseMatrix> for Value {
    fn from(m: DenseMatrix) -> Self {
        Value::Dense(m)
    }
}

impl From<SparseMatrix> for Value {
    fn from(m: SparseMatrix) -> Self {
        Value::Sparse(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            ValueKind::Number,
            ValueKind::BigInt,
            ValueKind::Fraction,
            ValueKind::Complex,
            ValueKind::Unit,
            ValueKind::Bool,
            ValueKind::Array,
            ValueKind::Dense,
            ValueKind::Sparse,
        ] {
            assert_eq!(ValueKind::parse(kind.name()), Some(kind));
        }
        assert_eq!(ValueKind::parse("Matrix"), None);
    }

    #[test]
    fn accessor_mismatch_reports_actual_type() {
        let v = Value::number(1.0);
        let err = v.as_sparse().unwrap_err();
        assert!(err.to_string().contains("Number"));
    }
}
