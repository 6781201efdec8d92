//! Feature matrices accepted by the projection hasher.
//!
//! The hasher only needs a matrix's shape and the product of one row with
//! the fitted basis. [`FeatureMatrix`] exposes exactly that, so dense
//! `ndarray` arrays and the compressed sparse row [`CsrMatrix`] are handled
//! the same way.

use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
use num_traits::AsPrimitive;

use crate::config::ProjectionError;

/// A row-major numeric matrix of shape `(rows, dimension)`.
pub trait FeatureMatrix {
    fn shape(&self) -> (usize, usize);

    /// Multiply row `row` by `basis` (shape `(dimension, n_bits)`).
    ///
    /// `basis.nrows()` must equal the matrix's column count; callers check
    /// the shape first and report a dimension mismatch.
    ///
    /// Zero entries contribute nothing, and non-zero entries are accumulated
    /// in column order, so a dense and a sparse matrix holding the same
    /// values project identically.
    fn project_row(&self, row: usize, basis: &Array2<f64>) -> Array1<f64>;
}

impl<A, S> FeatureMatrix for ArrayBase<S, Ix2>
where
    S: Data<Elem = A>,
    A: AsPrimitive<f64>,
{
    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    fn project_row(&self, row: usize, basis: &Array2<f64>) -> Array1<f64> {
        debug_assert_eq!(basis.nrows(), self.ncols(), "basis dimension mismatch");
        let mut out = Array1::zeros(basis.ncols());
        for (&value, plane_row) in self.row(row).iter().zip(basis.rows()) {
            let value: f64 = value.as_();
            if value != 0.0 {
                out.scaled_add(value, &plane_row);
            }
        }
        out
    }
}

/// Compressed sparse row matrix of `f64` values.
///
/// Column indices are kept sorted within each row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    /// Build from raw CSR arrays.
    ///
    /// Row `i` owns `indices[indptr[i]..indptr[i + 1]]` and the matching
    /// `data` slice. Unsorted rows are sorted; duplicate or out-of-range
    /// column indices are rejected.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> Result<Self, ProjectionError> {
        if indptr.len() != n_rows + 1 {
            return Err(ProjectionError::InvalidSparse(format!(
                "indptr has {} entries, expected {}",
                indptr.len(),
                n_rows + 1
            )));
        }
        if indices.len() != data.len() {
            return Err(ProjectionError::InvalidSparse(format!(
                "{} indices but {} values",
                indices.len(),
                data.len()
            )));
        }
        if indptr[0] != 0 || indptr[n_rows] != indices.len() {
            return Err(ProjectionError::InvalidSparse(
                "indptr must start at 0 and end at nnz".into(),
            ));
        }
        if indptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(ProjectionError::InvalidSparse(
                "indptr must be non-decreasing".into(),
            ));
        }
        if let Some(&col) = indices.iter().find(|&&c| c >= n_cols) {
            return Err(ProjectionError::InvalidSparse(format!(
                "column index {col} out of range for {n_cols} columns"
            )));
        }

        let mut indices = indices;
        let mut data = data;
        for row in 0..n_rows {
            let (start, end) = (indptr[row], indptr[row + 1]);
            let cols = &indices[start..end];
            if cols.windows(2).all(|w| w[0] < w[1]) {
                continue;
            }
            let mut entries: Vec<(usize, f64)> = cols
                .iter()
                .copied()
                .zip(data[start..end].iter().copied())
                .collect();
            entries.sort_unstable_by_key(|&(c, _)| c);
            if entries.windows(2).any(|w| w[0].0 == w[1].0) {
                return Err(ProjectionError::InvalidSparse(format!(
                    "duplicate column index in row {row}"
                )));
            }
            for (offset, (c, v)) in entries.into_iter().enumerate() {
                indices[start + offset] = c;
                data[start + offset] = v;
            }
        }

        Ok(Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
        })
    }

    /// Build from per-row `(column, value)` lists.
    pub fn from_rows(n_cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<Self, ProjectionError> {
        let n_rows = rows.len();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for row in rows {
            for (col, value) in row {
                indices.push(col);
                data.push(value);
            }
            indptr.push(indices.len());
        }
        Self::new(n_rows, n_cols, indptr, indices, data)
    }

    /// Keep the non-zero entries of a dense matrix.
    pub fn from_dense<A, S>(dense: &ArrayBase<S, Ix2>) -> Self
    where
        S: Data<Elem = A>,
        A: AsPrimitive<f64>,
    {
        let (n_rows, n_cols) = dense.dim();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for row in dense.rows() {
            for (col, &value) in row.iter().enumerate() {
                let value: f64 = value.as_();
                if value != 0.0 {
                    indices.push(col);
                    data.push(value);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
        }
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.n_rows, self.n_cols));
        for row in 0..self.n_rows {
            let (cols, values) = self.row(row);
            for (&col, &value) in cols.iter().zip(values) {
                dense[[row, col]] = value;
            }
        }
        dense
    }

    /// Column indices and values stored for `row`.
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        (&self.indices[start..end], &self.data[start..end])
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
}

impl FeatureMatrix for CsrMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    fn project_row(&self, row: usize, basis: &Array2<f64>) -> Array1<f64> {
        debug_assert_eq!(basis.nrows(), self.n_cols, "basis dimension mismatch");
        let mut out = Array1::zeros(basis.ncols());
        let (cols, values) = self.row(row);
        for (&col, &value) in cols.iter().zip(values) {
            if value != 0.0 {
                out.scaled_add(value, &basis.row(col));
            }
        }
        out
    }
}
