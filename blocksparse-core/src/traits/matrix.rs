//! Matrix abstraction traits used by the optimizer inner loop
//!
//! These are pure interfaces. The block-sparse engine and the export
//! formats in the `blocksparse` crate implement them.

use super::element::MatrixElement;

/// A matrix that can only be applied to vectors
///
/// Both products accumulate into `y`. Callers that want a fresh product
/// must zero `y` first.
pub trait LinearOperator {
    /// The scalar type of the operator
    type Element: MatrixElement;

    /// `y += A * x`, where `x.len() == num_cols()` and `y.len() == num_rows()`
    fn right_multiply(&self, x: &[Self::Element], y: &mut [Self::Element]);

    /// `y += A^T * x`, where `x.len() == num_rows()` and `y.len() == num_cols()`
    fn left_multiply(&self, x: &[Self::Element], y: &mut [Self::Element]);

    /// Number of scalar rows
    fn num_rows(&self) -> usize;

    /// Number of scalar columns
    fn num_cols(&self) -> usize;
}

/// A linear operator with explicitly stored values
///
/// Adds the column-wise operations a trust-region solver uses for
/// Jacobian scaling.
pub trait SparseMatrix: LinearOperator {
    /// Overwrite `x` with the squared 2-norm of every column
    fn squared_column_norm(&self, x: &mut [Self::Element]);

    /// Multiply column `j` by `scale[j]` in place
    fn scale_columns(&mut self, scale: &[Self::Element]);

    /// Set every stored value to zero, keeping the sparsity pattern
    fn set_zero(&mut self);

    /// Number of stored scalars
    fn num_nonzeros(&self) -> usize;

    /// Stored values
    fn values(&self) -> &[Self::Element];

    /// Stored values, mutable
    fn values_mut(&mut self) -> &mut [Self::Element];
}
