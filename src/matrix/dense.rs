//! Dense matrices: every logical cell stored explicitly.
//!
//! Storage is a flat row-major element vector plus a shape vector; the
//! element count always equals the product of the dimensions. Elements are
//! runtime-typed [`Scalar`] values, so a single matrix can hold whatever
//! kind its producer put there — the dispatcher and kernels sort out what
//! is legal per cell pair.

use crate::error::{NumatError, Result};
use crate::scalar::Scalar;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    data: Vec<Scalar>,
    shape: Vec<usize>,
}

impl DenseMatrix {
    /// Construct from a flat row-major element vector and a shape.
    pub fn new(data: Vec<Scalar>, shape: Vec<usize>) -> Result<Self> {
        if shape.is_empty() {
            return Err(NumatError::InvalidMatrix("shape must have at least one dimension".into()));
        }
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(NumatError::InvalidMatrix(format!(
                "{} elements do not fill shape {:?}",
                data.len(),
                shape
            )));
        }
        Ok(Self { data, shape })
    }

    /// A matrix of the given shape with every cell set to `value`.
    pub fn filled(value: Scalar, shape: Vec<usize>) -> Self {
        let n = shape.iter().product();
        Self { data: vec![value; n], shape }
    }

    /// Convenience two-dimensional constructor; rejects ragged rows.
    pub fn from_rows(rows: Vec<Vec<Scalar>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(NumatError::DimensionMismatch {
                    expected: vec![ncols],
                    got: vec![row.len()],
                });
            }
            data.extend(row);
        }
        Self::new(data, vec![nrows, ncols])
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[Scalar] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [Scalar] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rows and columns of a two-dimensional matrix.
    pub fn dims2(&self) -> Result<(usize, usize)> {
        match self.shape.as_slice() {
            &[r, c] => Ok((r, c)),
            other => Err(NumatError::InvalidMatrix(format!(
                "expected a two-dimensional matrix, got shape {:?}",
                other
            ))),
        }
    }

    /// Cell of a two-dimensional matrix. Callers validate `dims2` first.
    pub fn get2(&self, i: usize, j: usize) -> &Scalar {
        let cols = self.shape[1];
        &self.data[i * cols + j]
    }

    /// Cell by full coordinate vector, `None` out of range.
    pub fn get(&self, index: &[usize]) -> Option<&Scalar> {
        self.flat_index(index).map(|i| &self.data[i])
    }

    /// Overwrite a cell by full coordinate vector.
    pub fn set(&mut self, index: &[usize], value: Scalar) -> Result<()> {
        match self.flat_index(index) {
            Some(i) => {
                self.data[i] = value;
                Ok(())
            }
            None => Err(NumatError::DimensionMismatch {
                expected: self.shape.clone(),
                got: index.to_vec(),
            }),
        }
    }

    fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        Some(flat)
    }

    /// Apply `f` to every element, producing a same-shape matrix.
    pub fn map(&self, mut f: impl FnMut(&Scalar) -> Result<Scalar>) -> Result<Self> {
        let mut data = Vec::with_capacity(self.data.len());
        for x in &self.data {
            data.push(f(x)?);
        }
        Ok(Self { data, shape: self.shape.clone() })
    }

    /// Build from a nested array literal, validating rectangularity.
    pub fn from_array(items: &[Value]) -> Result<Self> {
        let mut shape = vec![items.len()];
        let mut probe = items;
        while let Some(Value::Array(inner)) = probe.first() {
            shape.push(inner.len());
            probe = inner;
        }
        let mut data = Vec::new();
        flatten(items, &shape, 0, &mut data)?;
        Self::new(data, shape)
    }

    /// Convert back into a nested array literal.
    pub fn to_array(&self) -> Value {
        nest(&self.data, &self.shape)
    }
}

fn flatten(items: &[Value], shape: &[usize], depth: usize, out: &mut Vec<Scalar>) -> Result<()> {
    if items.len() != shape[depth] {
        return Err(NumatError::DimensionMismatch {
            expected: vec![shape[depth]],
            got: vec![items.len()],
        });
    }
    let leaf = depth + 1 == shape.len();
    for item in items {
        match item {
            Value::Array(inner) if !leaf => flatten(inner, shape, depth + 1, out)?,
            Value::Scalar(s) if leaf => out.push(s.clone()),
            other => {
                return Err(NumatError::InvalidMatrix(format!(
                    "ragged nesting: {} at depth {}",
                    other.type_name(),
                    depth + 1
                )));
            }
        }
    }
    Ok(())
}

fn nest(data: &[Scalar], shape: &[usize]) -> Value {
    if shape.len() == 1 {
        return Value::Array(data.iter().cloned().map(Value::Scalar).collect());
    }
    let inner: usize = shape[1..].iter().product();
    Value::Array(
        (0..shape[0])
            .map(|i| nest(&data[i * inner..(i + 1) * inner], &shape[1..]))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(x: f64) -> Scalar {
        Scalar::Number(x)
    }

    #[test]
    fn new_checks_element_count() {
        assert!(DenseMatrix::new(vec![num(1.0); 6], vec![2, 3]).is_ok());
        assert!(DenseMatrix::new(vec![num(1.0); 5], vec![2, 3]).is_err());
    }

    #[test]
    fn row_major_indexing() {
        let m = DenseMatrix::from_rows(vec![
            vec![num(1.0), num(2.0), num(3.0)],
            vec![num(4.0), num(5.0), num(6.0)],
        ])
        .unwrap();
        assert_eq!(m.get2(1, 0), &num(4.0));
        assert_eq!(m.get(&[0, 2]), Some(&num(3.0)));
        assert_eq!(m.get(&[2, 0]), None);
    }

    #[test]
    fn set_by_coordinate() {
        let mut m = DenseMatrix::filled(num(0.0), vec![2, 2]);
        m.set(&[1, 1], num(9.0)).unwrap();
        assert_eq!(m.get2(1, 1), &num(9.0));
        assert!(m.set(&[2, 0], num(1.0)).is_err());
    }

    #[test]
    fn array_round_trip() {
        let arr = vec![
            Value::Array(vec![Value::Scalar(num(1.0)), Value::Scalar(num(2.0))]),
            Value::Array(vec![Value::Scalar(num(3.0)), Value::Scalar(num(4.0))]),
        ];
        let m = DenseMatrix::from_array(&arr).unwrap();
        assert_eq!(m.shape(), &[2, 2]);
        assert_eq!(m.to_array(), Value::Array(arr));
    }

    #[test]
    fn ragged_array_rejected() {
        let arr = vec![
            Value::Array(vec![Value::Scalar(num(1.0)), Value::Scalar(num(2.0))]),
            Value::Array(vec![Value::Scalar(num(3.0))]),
        ];
        assert!(DenseMatrix::from_array(&arr).is_err());
    }
}
