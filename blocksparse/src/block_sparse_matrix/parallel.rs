//! Rayon execution paths for the block-sparse operations
//!
//! Work is always split so that no two tasks write the same output range:
//! by row-block for products into row space and for in-place scaling, by
//! column-block (through the transpose index) for products into column
//! space. Each output range sees its contributions in the same order as
//! the serial path, so results are bit-identical.

use blocksparse_core::{small_blas, MatrixElement};
use rayon::prelude::*;

use super::BlockSparseMatrix;

/// Split `data` into consecutive mutable pieces of the given sizes
fn split_by_sizes<T>(mut data: &mut [T], sizes: impl Iterator<Item = usize>) -> Vec<&mut [T]> {
    let mut parts = Vec::with_capacity(sizes.size_hint().0);
    for size in sizes {
        let (head, tail) = std::mem::take(&mut data).split_at_mut(size);
        parts.push(head);
        data = tail;
    }
    parts
}

pub(super) fn right_multiply<T: MatrixElement>(m: &BlockSparseMatrix<T>, x: &[T], y: &mut [T]) {
    let bs = &m.block_structure;
    let values = &m.values;
    let y_parts = split_by_sizes(y, bs.rows.iter().map(|row| row.block.size));

    bs.rows
        .par_iter()
        .zip(y_parts.into_par_iter())
        .for_each(|(row, y_row)| {
            for cell in &row.cells {
                let col_block = bs.column_block(cell.column_block_id);
                let start = cell.value_offset;
                small_blas::matrix_vector_multiply(
                    &values[start..start + row.block.size * col_block.size],
                    row.block.size,
                    col_block.size,
                    &x[col_block.range()],
                    y_row,
                );
            }
        });
}

pub(super) fn left_multiply<T: MatrixElement>(m: &BlockSparseMatrix<T>, x: &[T], y: &mut [T]) {
    let ts = &m.transpose_structure;
    let values = &m.values;
    let y_parts = split_by_sizes(y, ts.cols.iter().map(|col| col.block.size));

    ts.cols
        .par_iter()
        .zip(y_parts.into_par_iter())
        .for_each(|(col, y_col)| {
            for cell in &col.cells {
                let row_block = ts.row_blocks[cell.row_block_id];
                let start = cell.value_offset;
                small_blas::matrix_transpose_vector_multiply(
                    &values[start..start + row_block.size * col.block.size],
                    row_block.size,
                    col.block.size,
                    &x[row_block.range()],
                    y_col,
                );
            }
        });
}

/// Accumulates into `x`; the caller zeroes it
pub(super) fn squared_column_norm<T: MatrixElement>(m: &BlockSparseMatrix<T>, x: &mut [T]) {
    let ts = &m.transpose_structure;
    let values = &m.values;
    let x_parts = split_by_sizes(x, ts.cols.iter().map(|col| col.block.size));

    ts.cols
        .par_iter()
        .zip(x_parts.into_par_iter())
        .for_each(|(col, x_col)| {
            for cell in &col.cells {
                let row_block = ts.row_blocks[cell.row_block_id];
                let start = cell.value_offset;
                small_blas::squared_column_norm(
                    &values[start..start + row_block.size * col.block.size],
                    row_block.size,
                    col.block.size,
                    x_col,
                );
            }
        });
}

pub(super) fn scale_columns<T: MatrixElement>(m: &mut BlockSparseMatrix<T>, scale: &[T]) {
    let bs = &m.block_structure;
    let row_starts = &m.row_value_offsets[..bs.rows.len()];
    let row_lens = m.row_value_offsets.windows(2).map(|w| w[1] - w[0]);
    let value_parts = split_by_sizes(&mut m.values, row_lens);

    bs.rows
        .par_iter()
        .zip(row_starts.par_iter())
        .zip(value_parts.into_par_iter())
        .for_each(|((row, &row_start), row_values)| {
            for cell in &row.cells {
                let col_block = bs.column_block(cell.column_block_id);
                let start = cell.value_offset - row_start;
                small_blas::scale_columns(
                    &mut row_values[start..start + row.block.size * col_block.size],
                    row.block.size,
                    col_block.size,
                    &scale[col_block.range()],
                );
            }
        });
}
