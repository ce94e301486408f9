//! Dense kernels for the small row-major blocks stored in a cell
//!
//! Every kernel takes the block as a flat row-major slice of exactly
//! `num_rows * num_cols` values and accumulates into its output.

use crate::MatrixElement;

/// `y += A * x` for a dense `num_rows x num_cols` block
#[inline]
pub fn matrix_vector_multiply<T: MatrixElement>(
    a: &[T],
    num_rows: usize,
    num_cols: usize,
    x: &[T],
    y: &mut [T],
) {
    debug_assert_eq!(a.len(), num_rows * num_cols);
    debug_assert_eq!(x.len(), num_cols);
    debug_assert_eq!(y.len(), num_rows);

    if num_cols == 0 {
        return;
    }

    for (row, out) in a.chunks_exact(num_cols).zip(y.iter_mut()) {
        let mut sum = T::ZERO;
        for (&a_rc, &x_c) in row.iter().zip(x) {
            sum += a_rc * x_c;
        }
        *out += sum;
    }
}

/// `y += A^T * x` for a dense `num_rows x num_cols` block
#[inline]
pub fn matrix_transpose_vector_multiply<T: MatrixElement>(
    a: &[T],
    num_rows: usize,
    num_cols: usize,
    x: &[T],
    y: &mut [T],
) {
    debug_assert_eq!(a.len(), num_rows * num_cols);
    debug_assert_eq!(x.len(), num_rows);
    debug_assert_eq!(y.len(), num_cols);

    if num_cols == 0 {
        return;
    }

    for (row, &x_r) in a.chunks_exact(num_cols).zip(x) {
        for (out, &a_rc) in y.iter_mut().zip(row) {
            *out += a_rc * x_r;
        }
    }
}

/// `y[c] += sum_r A[r, c]^2` for a dense `num_rows x num_cols` block
#[inline]
pub fn squared_column_norm<T: MatrixElement>(
    a: &[T],
    num_rows: usize,
    num_cols: usize,
    y: &mut [T],
) {
    debug_assert_eq!(a.len(), num_rows * num_cols);
    debug_assert_eq!(y.len(), num_cols);

    if num_cols == 0 {
        return;
    }

    for row in a.chunks_exact(num_cols) {
        for (out, &a_rc) in y.iter_mut().zip(row) {
            *out += a_rc * a_rc;
        }
    }
}

/// `A[r, c] *= scale[c]` in place for a dense `num_rows x num_cols` block
#[inline]
pub fn scale_columns<T: MatrixElement>(a: &mut [T], num_rows: usize, num_cols: usize, scale: &[T]) {
    debug_assert_eq!(a.len(), num_rows * num_cols);
    debug_assert_eq!(scale.len(), num_cols);

    if num_cols == 0 {
        return;
    }

    for row in a.chunks_exact_mut(num_cols) {
        for (a_rc, &s) in row.iter_mut().zip(scale) {
            *a_rc *= s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // [1 2 3]
    // [4 5 6]
    const A: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    #[test]
    fn test_matrix_vector_multiply_accumulates() {
        let x = [1.0, 0.0, -1.0];
        let mut y = [10.0, 20.0];
        matrix_vector_multiply(&A, 2, 3, &x, &mut y);
        assert_eq!(y, [8.0, 18.0]);
    }

    #[test]
    fn test_matrix_transpose_vector_multiply() {
        let x = [1.0, 2.0];
        let mut y = [0.0; 3];
        matrix_transpose_vector_multiply(&A, 2, 3, &x, &mut y);
        assert_eq!(y, [9.0, 12.0, 15.0]);
    }

    #[test]
    fn test_squared_column_norm() {
        let mut y = [1.0, 0.0, 0.0];
        squared_column_norm(&A, 2, 3, &mut y);
        assert_eq!(y, [18.0, 29.0, 45.0]);
    }

    #[test]
    fn test_scale_columns() {
        let mut a = A;
        scale_columns(&mut a, 2, 3, &[2.0, 1.0, 0.5]);
        assert_eq!(a, [2.0, 2.0, 1.5, 8.0, 5.0, 3.0]);
    }

    #[test]
    fn test_empty_block() {
        let mut y: [f64; 0] = [];
        matrix_vector_multiply(&[], 0, 3, &[1.0, 2.0, 3.0], &mut y);
        let mut y = [1.0, 2.0];
        matrix_vector_multiply(&[], 2, 0, &[], &mut y);
        assert_eq!(y, [1.0, 2.0]);
    }
}
