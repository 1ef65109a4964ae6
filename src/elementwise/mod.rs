//! Elementwise traversal algorithms over every storage-shape pairing.
//!
//! Five storage pairings (dense×dense, dense×sparse, sparse×dense by
//! flipping, sparse×sparse, matrix×scalar in both orders) times the
//! question "may an implicit cell stay implicit?" give the fourteen
//! members implemented here. The skip decisions are never guessed: each
//! variant names the [`ZeroLaws`] that license it, and
//! [`suite::build_suite`] checks those licences against the laws the
//! kernel declared.

pub mod laws;
pub use laws::ZeroLaws;

pub mod dense;
pub use dense::{dense_dense, dense_scalar};
pub mod dense_sparse;
pub use dense_sparse::{dense_sparse_full, dense_sparse_keep, dense_sparse_zero};
pub mod sparse_sparse;
pub use sparse_sparse::{
    sparse_apply_left, sparse_full, sparse_intersect, sparse_keep_left, sparse_union_apply,
    sparse_union_keep,
};
pub mod sparse_scalar;
pub use sparse_scalar::{sparse_scalar_full, sparse_scalar_keep, sparse_scalar_zero};
pub mod suite;
pub use suite::{SuiteOptions, build_suite};

use crate::config::Config;
use crate::dispatch::TypedFn;
use crate::error::Result;
use crate::matrix::{DenseMatrix, SparseMatrix};
use crate::scalar::Scalar;
use crate::value::Value;

/// Run the kernel on one cell pair, restoring the caller's argument
/// order when the traversal swapped its operands.
pub(crate) fn invoke(op: &TypedFn, invert: bool, x: &Scalar, y: &Scalar) -> Result<Scalar> {
    let (p, q) = if invert { (y, x) } else { (x, y) };
    op.call2(Value::Scalar(p.clone()), Value::Scalar(q.clone()))?
        .into_scalar()
}

/// Sparse×sparse traversal choice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SparseSparseVariant {
    /// Union merge, one-sided entries kept verbatim.
    UnionKeep,
    /// Union merge, one-sided entries computed against zero.
    UnionApply,
    /// Intersection merge.
    Intersect,
    /// Every cell computed; dense result.
    Full,
    /// Left-only kept, right-only skipped.
    KeepLeft,
    /// Left pattern walked in full, right-only skipped.
    ApplyLeft,
}

impl SparseSparseVariant {
    /// Laws the kernel must declare for this traversal to be sound.
    pub fn required_laws(self) -> ZeroLaws {
        match self {
            SparseSparseVariant::UnionKeep => ZeroLaws::RIGHT_IDENTITY | ZeroLaws::LEFT_IDENTITY,
            SparseSparseVariant::UnionApply => ZeroLaws::ZERO_FIXED,
            SparseSparseVariant::Intersect => {
                ZeroLaws::RIGHT_ANNIHILATES | ZeroLaws::LEFT_ANNIHILATES
            }
            SparseSparseVariant::Full => ZeroLaws::empty(),
            SparseSparseVariant::KeepLeft => {
                ZeroLaws::RIGHT_IDENTITY | ZeroLaws::LEFT_ANNIHILATES
            }
            SparseSparseVariant::ApplyLeft => ZeroLaws::LEFT_ANNIHILATES,
        }
    }

    pub fn run(
        self,
        a: &SparseMatrix,
        b: &SparseMatrix,
        op: &TypedFn,
        config: &Config,
    ) -> Result<Value> {
        match self {
            SparseSparseVariant::UnionKeep => sparse_union_keep(a, b, op, config),
            SparseSparseVariant::UnionApply => sparse_union_apply(a, b, op, config),
            SparseSparseVariant::Intersect => sparse_intersect(a, b, op, config),
            SparseSparseVariant::Full => sparse_full(a, b, op),
            SparseSparseVariant::KeepLeft => sparse_keep_left(a, b, op, config),
            SparseSparseVariant::ApplyLeft => sparse_apply_left(a, b, op, config),
        }
    }
}

/// Dense×sparse traversal choice. `inverted` in the law queries means the
/// caller's order was sparse-first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DenseSparseVariant {
    /// Implicit sparse cells keep the dense value; dense result.
    Keep,
    /// Implicit sparse cells stay implicit; sparse result.
    Zero,
    /// Every cell computed; dense result.
    Full,
}

impl DenseSparseVariant {
    pub fn required_laws(self, inverted: bool) -> ZeroLaws {
        match (self, inverted) {
            (DenseSparseVariant::Keep, false) => ZeroLaws::RIGHT_IDENTITY,
            (DenseSparseVariant::Keep, true) => ZeroLaws::LEFT_IDENTITY,
            (DenseSparseVariant::Zero, false) => ZeroLaws::RIGHT_ANNIHILATES,
            (DenseSparseVariant::Zero, true) => ZeroLaws::LEFT_ANNIHILATES,
            (DenseSparseVariant::Full, _) => ZeroLaws::empty(),
        }
    }

    pub fn run(
        self,
        d: &DenseMatrix,
        s: &SparseMatrix,
        op: &TypedFn,
        invert: bool,
        config: &Config,
    ) -> Result<Value> {
        match self {
            DenseSparseVariant::Keep => dense_sparse_keep(d, s, op, invert),
            DenseSparseVariant::Zero => dense_sparse_zero(d, s, op, invert, config),
            DenseSparseVariant::Full => dense_sparse_full(d, s, op, invert),
        }
    }
}

/// Sparse×scalar traversal choice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SparseScalarVariant {
    /// Implicit cells stay implicit; sparse result.
    Zero,
    /// Implicit cells become the scalar; dense result.
    Keep,
    /// Implicit cells become `op(0, scalar)`; dense result.
    Full,
}

impl SparseScalarVariant {
    pub fn required_laws(self, inverted: bool) -> ZeroLaws {
        match (self, inverted) {
            (SparseScalarVariant::Zero, false) => ZeroLaws::LEFT_ANNIHILATES,
            (SparseScalarVariant::Zero, true) => ZeroLaws::RIGHT_ANNIHILATES,
            (SparseScalarVariant::Keep, false) => ZeroLaws::LEFT_IDENTITY,
            (SparseScalarVariant::Keep, true) => ZeroLaws::RIGHT_IDENTITY,
            (SparseScalarVariant::Full, _) => ZeroLaws::empty(),
        }
    }

    pub fn run(
        self,
        a: &SparseMatrix,
        s: &Scalar,
        op: &TypedFn,
        invert: bool,
        config: &Config,
    ) -> Result<Value> {
        match self {
            SparseScalarVariant::Zero => sparse_scalar_zero(a, s, op, invert, config),
            SparseScalarVariant::Keep => sparse_scalar_keep(a, s, op, invert),
            SparseScalarVariant::Full => sparse_scalar_full(a, s, op, invert),
        }
    }
}
