//! Compressed sparse row (CSR) matrices
//!
//! Scalar-level CSR export of a block-sparse matrix for solvers that
//! factorize explicit sparse matrices.

use std::ops::Range;

use blocksparse_core::{
    validation::validate_vector_len, BlockSparseError, LinearOperator, MatrixElement, SparseMatrix,
};
use ndarray::Array2;

/// Sparse matrix in compressed sparse row form
///
/// Entries of row `i` live at `row_ptr[i]..row_ptr[i + 1]`. Column
/// indices inside a row are not required to be sorted or unique.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedRowSparseMatrix<T: MatrixElement = f64> {
    num_rows: usize,
    num_cols: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: MatrixElement> CompressedRowSparseMatrix<T> {
    /// Create from raw CSR arrays with validation
    pub fn from_raw_parts(
        num_rows: usize,
        num_cols: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, BlockSparseError> {
        validate_vector_len(row_ptr.len(), num_rows + 1)?;
        validate_vector_len(col_indices.len(), values.len())?;
        if row_ptr[0] != 0 || row_ptr[num_rows] != values.len() {
            return Err(BlockSparseError::DimensionMismatch);
        }
        if row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(BlockSparseError::DimensionMismatch);
        }
        if col_indices.iter().any(|&col| col >= num_cols) {
            return Err(BlockSparseError::ColumnBlockOutOfRange);
        }

        Ok(Self::from_parts_unchecked(
            num_rows,
            num_cols,
            row_ptr,
            col_indices,
            values,
        ))
    }

    pub(crate) fn from_parts_unchecked(
        num_rows: usize,
        num_cols: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), num_rows + 1);
        debug_assert_eq!(col_indices.len(), values.len());
        Self {
            num_rows,
            num_cols,
            row_ptr,
            col_indices,
            values,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn num_nonzeros(&self) -> usize {
        self.values.len()
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Storage range of row `row`
    pub fn row_range(&self, row: usize) -> Range<usize> {
        self.row_ptr[row]..self.row_ptr[row + 1]
    }

    /// Iterate (col, value) of one row in storage order
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        self.row_range(row)
            .map(move |idx| (self.col_indices[idx], self.values[idx]))
    }

    /// Dense copy; repeated coordinates sum
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.num_rows, self.num_cols), T::ZERO);
        for row in 0..self.num_rows {
            for (col, value) in self.row_entries(row) {
                dense[[row, col]] += value;
            }
        }
        dense
    }
}

impl<T: MatrixElement> LinearOperator for CompressedRowSparseMatrix<T> {
    type Element = T;

    fn right_multiply(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.num_cols, "Input vector size mismatch");
        assert_eq!(y.len(), self.num_rows, "Output vector size mismatch");
        for (row, out) in y.iter_mut().enumerate() {
            let mut sum = T::ZERO;
            for (col, value) in self.row_entries(row) {
                sum += value * x[col];
            }
            *out += sum;
        }
    }

    fn left_multiply(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.num_rows, "Input vector size mismatch");
        assert_eq!(y.len(), self.num_cols, "Output vector size mismatch");
        for (row, &x_r) in x.iter().enumerate() {
            for (col, value) in self.row_entries(row) {
                y[col] += value * x_r;
            }
        }
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }
}

impl<T: MatrixElement> SparseMatrix for CompressedRowSparseMatrix<T> {
    fn squared_column_norm(&self, x: &mut [T]) {
        assert_eq!(x.len(), self.num_cols, "Output vector size mismatch");
        x.fill(T::ZERO);
        for (&col, &value) in self.col_indices.iter().zip(&self.values) {
            x[col] += value * value;
        }
    }

    fn scale_columns(&mut self, scale: &[T]) {
        assert_eq!(scale.len(), self.num_cols, "Scale vector size mismatch");
        for (value, &col) in self.values.iter_mut().zip(&self.col_indices) {
            *value *= scale[col];
        }
    }

    fn set_zero(&mut self) {
        self.values.fill(T::ZERO);
    }

    fn num_nonzeros(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_parts_validation() {
        let ok = CompressedRowSparseMatrix::from_raw_parts(
            2,
            2,
            vec![0, 1, 2],
            vec![1, 0],
            vec![5.0, 6.0],
        );
        assert!(ok.is_ok());

        let bad_ptr = CompressedRowSparseMatrix::from_raw_parts(
            2,
            2,
            vec![0, 2, 1],
            vec![1, 0],
            vec![5.0, 6.0],
        );
        assert_eq!(bad_ptr.err(), Some(BlockSparseError::DimensionMismatch));

        let bad_col =
            CompressedRowSparseMatrix::from_raw_parts(1, 1, vec![0, 1], vec![1], vec![5.0]);
        assert_eq!(bad_col.err(), Some(BlockSparseError::ColumnBlockOutOfRange));
    }

    #[test]
    fn test_products_and_norms() {
        // [0 5]
        // [6 0]
        let m = CompressedRowSparseMatrix::from_raw_parts(
            2,
            2,
            vec![0, 1, 2],
            vec![1, 0],
            vec![5.0, 6.0],
        )
        .unwrap();

        let mut y = [1.0, 1.0];
        m.right_multiply(&[1.0, 2.0], &mut y);
        assert_eq!(y, [11.0, 7.0]);

        let mut z = [0.0, 0.0];
        m.left_multiply(&[1.0, 2.0], &mut z);
        assert_eq!(z, [12.0, 5.0]);

        let mut norms = [0.0; 2];
        m.squared_column_norm(&mut norms);
        assert_eq!(norms, [36.0, 25.0]);
    }
}
