//! Coordinate (triplet) sparse matrices
//!
//! The explicit (row, col, value) form handed to solvers that need
//! coordinate input. Entries keep insertion order and may repeat a
//! coordinate; repeated entries sum.

use std::io::Write;

use blocksparse_core::{LinearOperator, MatrixElement, SparseMatrix};
use ndarray::Array2;

/// Write one `row col value` diagnostic line
pub(crate) fn write_text_line<W: Write, T: MatrixElement>(
    writer: &mut W,
    row: usize,
    col: usize,
    value: T,
) -> std::io::Result<()> {
    writeln!(writer, "{row:>10} {col:>10} {value:>17.6}")
}

/// Sparse matrix in coordinate form
#[derive(Debug, Clone, PartialEq)]
pub struct TripletSparseMatrix<T: MatrixElement = f64> {
    num_rows: usize,
    num_cols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<T>,
}

impl<T: MatrixElement> TripletSparseMatrix<T> {
    /// Create an empty `num_rows x num_cols` matrix
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self::with_capacity(num_rows, num_cols, 0)
    }

    /// Create an empty matrix with room for `capacity` entries
    pub fn with_capacity(num_rows: usize, num_cols: usize, capacity: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the matrix.
    pub fn push(&mut self, row: usize, col: usize, value: T) {
        assert!(row < self.num_rows, "Row index out of bounds");
        assert!(col < self.num_cols, "Column index out of bounds");
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
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

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterate entries in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&row, &col), &value)| (row, col, value))
    }

    /// Dense copy; repeated coordinates sum
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.num_rows, self.num_cols), T::ZERO);
        for (row, col, value) in self.iter() {
            dense[[row, col]] += value;
        }
        dense
    }

    /// Write `row col value`, one line per entry, in storage order
    pub fn write_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (row, col, value) in self.iter() {
            write_text_line(writer, row, col, value)?;
        }
        Ok(())
    }
}

impl<T: MatrixElement> LinearOperator for TripletSparseMatrix<T> {
    type Element = T;

    fn right_multiply(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.num_cols, "Input vector size mismatch");
        assert_eq!(y.len(), self.num_rows, "Output vector size mismatch");
        for (row, col, value) in self.iter() {
            y[row] += value * x[col];
        }
    }

    fn left_multiply(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.num_rows, "Input vector size mismatch");
        assert_eq!(y.len(), self.num_cols, "Output vector size mismatch");
        for (row, col, value) in self.iter() {
            y[col] += value * x[row];
        }
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }
}

impl<T: MatrixElement> SparseMatrix for TripletSparseMatrix<T> {
    fn squared_column_norm(&self, x: &mut [T]) {
        assert_eq!(x.len(), self.num_cols, "Output vector size mismatch");
        x.fill(T::ZERO);
        for (_, col, value) in self.iter() {
            x[col] += value * value;
        }
    }

    fn scale_columns(&mut self, scale: &[T]) {
        assert_eq!(scale.len(), self.num_cols, "Scale vector size mismatch");
        for (value, &col) in self.values.iter_mut().zip(&self.cols) {
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
