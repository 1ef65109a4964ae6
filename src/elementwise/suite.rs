//! Suite builder: one scalar kernel in, a full signature table out.
//!
//! Given the kernel, its declared zero laws, and the traversal members
//! that apply, `build_suite` produces every dense/sparse/array signature a
//! binary elementwise operation needs, flips the sparse-dense and
//! scalar-sparse members from their mirrors when no explicit override is
//! given, and merges the kernel's own scalar signatures so one table
//! drives the whole dispatch. Building is pure and per-function — tables
//! share nothing and never change after construction.

use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::{Pattern, Signature, TypedFn};
use crate::elementwise::{
    DenseSparseVariant, SparseScalarVariant, SparseSparseVariant, ZeroLaws, dense_dense,
    dense_scalar,
};
use crate::error::{NumatError, Result};
use crate::matrix::DenseMatrix;
use crate::value::Value;

/// Which traversal members make up an operation's suite.
pub struct SuiteOptions {
    /// The scalar kernel; its own signatures are merged into the table.
    pub elop: Arc<TypedFn>,
    /// Zero laws the kernel satisfies; checked against every member.
    pub laws: ZeroLaws,
    /// Tolerance forwarded to the traversals' zero tests.
    pub config: Config,
    /// Sparse×sparse member.
    pub ss: SparseSparseVariant,
    /// Dense×sparse member.
    pub ds: DenseSparseVariant,
    /// Sparse×dense member; defaults to `ds` with swapped operands.
    pub sd: Option<DenseSparseVariant>,
    /// Sparse×scalar member; omit to generate no scalar signatures.
    pub sparse_scalar: Option<SparseScalarVariant>,
    /// Scalar×sparse member; defaults to `sparse_scalar` with swapped
    /// operands.
    pub scalar_sparse: Option<SparseScalarVariant>,
    /// Constraint text for the scalar positions, `"any"` if omitted.
    pub scalar: Option<&'static str>,
}

fn licence_check(
    name: &'static str,
    member: &str,
    required: ZeroLaws,
    declared: ZeroLaws,
) -> Result<()> {
    if !declared.contains(required) {
        return Err(NumatError::InvalidSuite(
            name,
            format!(
                "{} requires {:?} but the kernel declares {:?}",
                member, required, declared
            ),
        ));
    }
    Ok(())
}

fn array_to_dense(v: &Value) -> Result<DenseMatrix> {
    DenseMatrix::from_array(v.as_array()?)
}

fn as_array(v: Value) -> Result<Value> {
    match v {
        Value::Dense(m) => Ok(m.to_array()),
        other => Ok(other),
    }
}

/// Expand the options into the complete signature table.
pub fn build_suite(options: SuiteOptions) -> Result<Vec<Signature>> {
    let name = options.elop.name();
    let ss = options.ss;
    let ds = options.ds;
    let sd = options.sd.unwrap_or(ds);
    licence_check(name, "the sparse-sparse member", ss.required_laws(), options.laws)?;
    licence_check(name, "the dense-sparse member", ds.required_laws(false), options.laws)?;
    licence_check(name, "the sparse-dense member", sd.required_laws(true), options.laws)?;

    let cfg = options.config;
    let mut sigs = Vec::new();

    // Dense and array pairings all funnel into the dense-dense traversal.
    let elop = options.elop.clone();
    sigs.push(Signature::new("DenseMatrix, DenseMatrix", move |_, args| {
        dense_dense(args[0].as_dense()?, args[1].as_dense()?, &elop)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("Array, Array", move |_, args| {
        as_array(dense_dense(&array_to_dense(&args[0])?, &array_to_dense(&args[1])?, &elop)?)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("Array, DenseMatrix", move |_, args| {
        dense_dense(&array_to_dense(&args[0])?, args[1].as_dense()?, &elop)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("DenseMatrix, Array", move |_, args| {
        dense_dense(args[0].as_dense()?, &array_to_dense(&args[1])?, &elop)
    })?);

    // Sparse pairings route through the chosen members; the sparse-dense
    // side reuses the dense-sparse walk with operands swapped and the
    // kernel order restored through the invert flag.
    let elop = options.elop.clone();
    sigs.push(Signature::new("SparseMatrix, SparseMatrix", move |_, args| {
        ss.run(args[0].as_sparse()?, args[1].as_sparse()?, &elop, &cfg)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("DenseMatrix, SparseMatrix", move |_, args| {
        ds.run(args[0].as_dense()?, args[1].as_sparse()?, &elop, false, &cfg)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("Array, SparseMatrix", move |_, args| {
        ds.run(&array_to_dense(&args[0])?, args[1].as_sparse()?, &elop, false, &cfg)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("SparseMatrix, DenseMatrix", move |_, args| {
        sd.run(args[1].as_dense()?, args[0].as_sparse()?, &elop, true, &cfg)
    })?);
    let elop = options.elop.clone();
    sigs.push(Signature::new("SparseMatrix, Array", move |_, args| {
        sd.run(&array_to_dense(&args[1])?, args[0].as_sparse()?, &elop, true, &cfg)
    })?);

    // Scalar broadcasts only exist when the caller supplied a member.
    if let Some(sparse_scalar) = options.sparse_scalar {
        let scalar_sparse = options.scalar_sparse.unwrap_or(sparse_scalar);
        licence_check(
            name,
            "the sparse-scalar member",
            sparse_scalar.required_laws(false),
            options.laws,
        )?;
        licence_check(
            name,
            "the scalar-sparse member",
            scalar_sparse.required_laws(true),
            options.laws,
        )?;
        let sc = options.scalar.unwrap_or("any");

        let elop = options.elop.clone();
        sigs.push(Signature::new(&format!("DenseMatrix, {}", sc), move |_, args| {
            dense_scalar(args[0].as_dense()?, args[1].as_scalar()?, &elop, false)
        })?);
        let elop = options.elop.clone();
        sigs.push(Signature::new(&format!("{}, DenseMatrix", sc), move |_, args| {
            dense_scalar(args[1].as_dense()?, args[0].as_scalar()?, &elop, true)
        })?);
        let elop = options.elop.clone();
        sigs.push(Signature::new(&format!("Array, {}", sc), move |_, args| {
            as_array(dense_scalar(&array_to_dense(&args[0])?, args[1].as_scalar()?, &elop, false)?)
        })?);
        let elop = options.elop.clone();
        sigs.push(Signature::new(&format!("{}, Array", sc), move |_, args| {
            as_array(dense_scalar(&array_to_dense(&args[1])?, args[0].as_scalar()?, &elop, true)?)
        })?);
        let elop = options.elop.clone();
        sigs.push(Signature::new(&format!("SparseMatrix, {}", sc), move |_, args| {
            sparse_scalar.run(args[0].as_sparse()?, args[1].as_scalar()?, &elop, false, &cfg)
        })?);
        let elop = options.elop.clone();
        sigs.push(Signature::new(&format!("{}, SparseMatrix", sc), move |_, args| {
            scalar_sparse.run(args[1].as_sparse()?, args[0].as_scalar()?, &elop, true, &cfg)
        })?);
    }

    // Pull in the kernel's own scalar signatures so the one table covers
    // scalar calls too. Patterns already present win.
    let taken: Vec<Pattern> = sigs.iter().map(|s| s.pattern().clone()).collect();
    for sig in options.elop.signatures() {
        if !taken.contains(sig.pattern()) {
            sigs.push(sig.clone());
        }
    }

    Ok(sigs)
}
