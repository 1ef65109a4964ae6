//! Sparse matrices in compressed-column form.
//!
//! Storage is the classic CSC triplet: a column pointer array of length
//! `cols + 1`, a row-index array, and a value array, the latter two
//! aligned, with row indices strictly increasing inside each column. Cells
//! without an explicit entry are implicitly the zero element of the
//! matrix's declared scalar kind. Explicitly stored zeros are legal and
//! stay explicit; only true absence is implicit.

use crate::config::Config;
use crate::error::{NumatError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::scalar::{Scalar, ScalarKind};

#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<Scalar>,
    kind: ScalarKind,
}

impl SparseMatrix {
    /// Build from raw compressed-column storage.
    pub fn from_parts(
        rows: usize,
        cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<Scalar>,
        kind: ScalarKind,
    ) -> Result<Self> {
        if col_ptr.len() != cols + 1 || col_ptr[0] != 0 || *col_ptr.last().unwrap() != row_idx.len()
        {
            return Err(NumatError::InvalidMatrix(format!(
                "column pointers {:?} do not describe {} columns with {} entries",
                col_ptr,
                cols,
                row_idx.len()
            )));
        }
        if row_idx.len() != values.len() {
            return Err(NumatError::InvalidMatrix(format!(
                "{} row indices vs {} values",
                row_idx.len(),
                values.len()
            )));
        }
        for j in 0..cols {
            if col_ptr[j] > col_ptr[j + 1] {
                return Err(NumatError::InvalidMatrix(format!(
                    "column pointer not monotone at column {}",
                    j
                )));
            }
            let col = &row_idx[col_ptr[j]..col_ptr[j + 1]];
            for pair in col.windows(2) {
                if pair[0] >= pair[1] {
                    return Err(NumatError::InvalidMatrix(format!(
                        "row indices not strictly increasing in column {}",
                        j
                    )));
                }
            }
            if let Some(&last) = col.last() {
                if last >= rows {
                    return Err(NumatError::InvalidMatrix(format!(
                        "row index {} out of range in column {}",
                        last, j
                    )));
                }
            }
        }
        Ok(Self { rows, cols, col_ptr, row_idx, values, kind })
    }

    /// Build from `(value, row, column)` triples; rejects duplicates.
    pub fn from_triples(
        rows: usize,
        cols: usize,
        kind: ScalarKind,
        entries: Vec<(Scalar, usize, usize)>,
    ) -> Result<Self> {
        let mut entries = entries;
        entries.sort_by_key(|&(_, r, c)| (c, r));
        let mut builder = SparseBuilder::new(rows, cols, kind);
        let mut col = 0;
        let mut last: Option<(usize, usize)> = None;
        for (v, r, c) in entries {
            if r >= rows || c >= cols {
                return Err(NumatError::InvalidMatrix(format!(
                    "entry ({}, {}) outside a {}x{} matrix",
                    r, c, rows, cols
                )));
            }
            if last == Some((r, c)) {
                return Err(NumatError::InvalidMatrix(format!(
                    "duplicate entry at ({}, {})",
                    r, c
                )));
            }
            last = Some((r, c));
            while col < c {
                builder.close_column();
                col += 1;
            }
            builder.push(r, v);
        }
        while col < cols {
            builder.close_column();
            col += 1;
        }
        Ok(builder.finish())
    }

    /// All-implicit matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize, kind: ScalarKind) -> Self {
        Self {
            rows,
            cols,
            col_ptr: vec![0; cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
            kind,
        }
    }

    /// Compress a dense matrix, dropping cells that test as zero.
    pub fn from_dense(m: &DenseMatrix, config: &Config) -> Result<Self> {
        let (rows, cols) = m.dims2()?;
        let kind = m.data().first().map_or(ScalarKind::Number, Scalar::kind);
        let mut builder = SparseBuilder::new(rows, cols, kind);
        for j in 0..cols {
            for i in 0..rows {
                let v = m.get2(i, j);
                if !v.is_zero(config) {
                    builder.push(i, v.clone());
                }
            }
            builder.close_column();
        }
        Ok(builder.finish())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    /// Declared scalar kind of the implicit zero.
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// The implicit zero element.
    pub fn zero(&self) -> Scalar {
        self.kind.zero()
    }

    /// Count of explicit entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Explicit entries over total cells.
    pub fn density(&self) -> f64 {
        let cells = self.rows * self.cols;
        if cells == 0 { 0.0 } else { self.nnz() as f64 / cells as f64 }
    }

    /// Explicit value at `(i, j)`, `None` when the cell is implicit.
    pub fn get(&self, i: usize, j: usize) -> Option<&Scalar> {
        if j >= self.cols {
            return None;
        }
        let (rows, _) = self.col(j);
        let k = rows.binary_search(&i).ok()?;
        Some(&self.values[self.col_ptr[j] + k])
    }

    /// Row indices and values of column `j`, sorted by row.
    pub fn col(&self, j: usize) -> (&[usize], &[Scalar]) {
        let lo = self.col_ptr[j];
        let hi = self.col_ptr[j + 1];
        (&self.row_idx[lo..hi], &self.values[lo..hi])
    }

    /// All explicit entries as `(value, row, column)`, column-major and
    /// row-sorted within each column.
    pub fn entries(&self) -> impl Iterator<Item = (&Scalar, usize, usize)> {
        (0..self.cols).flat_map(move |j| {
            let (rows, values) = self.col(j);
            rows.iter().zip(values).map(move |(&i, v)| (v, i, j))
        })
    }

    /// Materialize every cell.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut data = vec![self.zero(); self.rows * self.cols];
        for j in 0..self.cols {
            let (rows, values) = self.col(j);
            for (&i, v) in rows.iter().zip(values) {
                data[i * self.cols + j] = v.clone();
            }
        }
        DenseMatrix::new(data, vec![self.rows, self.cols]).expect("shape matches storage")
    }
}

/// Incremental CSC assembly used by the traversal algorithms.
///
/// Columns must be closed left to right; entries pushed between closes
/// must arrive in increasing row order. The finished matrix takes the kind
/// of the first pushed value, or the fallback kind when nothing was pushed.
pub struct SparseBuilder {
    rows: usize,
    cols: usize,
    fallback: ScalarKind,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<Scalar>,
}

impl SparseBuilder {
    pub fn new(rows: usize, cols: usize, fallback: ScalarKind) -> Self {
        Self {
            rows,
            cols,
            fallback,
            col_ptr: vec![0],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, row: usize, value: Scalar) {
        debug_assert!(row < self.rows);
        debug_assert!(self.row_idx[*self.col_ptr.last().unwrap()..]
            .last()
            .is_none_or(|&r| r < row));
        self.row_idx.push(row);
        self.values.push(value);
    }

    pub fn close_column(&mut self) {
        self.col_ptr.push(self.row_idx.len());
    }

    pub fn finish(self) -> SparseMatrix {
        assert_eq!(self.col_ptr.len(), self.cols + 1, "not all columns closed");
        let kind = self.values.first().map_or(self.fallback, Scalar::kind);
        SparseMatrix {
            rows: self.rows,
            cols: self.cols,
            col_ptr: self.col_ptr,
            row_idx: self.row_idx,
            values: self.values,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(x: f64) -> Scalar {
        Scalar::Number(x)
    }

    #[test]
    fn triples_round_trip() {
        // [[5,0],[0,3]]
        let m = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(num(5.0), 0, 0), (num(3.0), 1, 1)],
        )
        .unwrap();
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.density(), 0.5);
        assert_eq!(m.get(0, 0), Some(&num(5.0)));
        assert_eq!(m.get(0, 1), None);
        let d = m.to_dense();
        assert_eq!(d.get2(1, 1), &num(3.0));
        assert_eq!(d.get2(1, 0), &num(0.0));
        let entries: Vec<_> = m.entries().collect();
        assert_eq!(entries, vec![(&num(5.0), 0, 0), (&num(3.0), 1, 1)]);
    }

    #[test]
    fn duplicate_triples_rejected() {
        let r = SparseMatrix::from_triples(
            2,
            2,
            ScalarKind::Number,
            vec![(num(1.0), 0, 0), (num(2.0), 0, 0)],
        );
        assert!(r.is_err());
    }

    #[test]
    fn from_parts_validates_ordering() {
        // row indices 1, 0 in column 0 are out of order
        let r = SparseMatrix::from_parts(
            2,
            1,
            vec![0, 2],
            vec![1, 0],
            vec![num(1.0), num(2.0)],
            ScalarKind::Number,
        );
        assert!(r.is_err());
    }

    #[test]
    fn explicit_zero_stays_explicit() {
        let m = SparseMatrix::from_triples(2, 2, ScalarKind::Number, vec![(num(0.0), 0, 0)])
            .unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 0), Some(&num(0.0)));
    }
}
