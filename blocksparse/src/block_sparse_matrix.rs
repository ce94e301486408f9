//! Block-sparse matrix engine
//!
//! A [`BlockSparseMatrix`] owns a [`CompressedRowBlockStructure`] and one
//! flat value buffer. Every cell of the structure addresses a row-major
//! dense block inside that buffer through its value offset, so no block
//! owns an allocation of its own.

use std::ops::Range;

use blocksparse_core::{
    small_blas, validate_structure, Block, BlockSparseError, CompressedColumnBlockStructure,
    CompressedRowBlockStructure, LinearOperator, MatrixElement, SparseMatrix,
};

use crate::config::EngineConfig;

mod export;
mod parallel;

/// Options for random matrix generation
///
/// Kept so [`BlockSparseMatrix::create_random_matrix`] has a stable
/// signature. Random generation itself is not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomMatrixOptions {
    pub num_row_blocks: usize,
    pub min_row_block_size: usize,
    pub max_row_block_size: usize,
    pub num_col_blocks: usize,
    pub min_col_block_size: usize,
    pub max_col_block_size: usize,
    /// Probability in `(0, 1]` that a (row-block, column-block) cell is nonzero
    pub block_density: f64,
}

impl Default for RandomMatrixOptions {
    fn default() -> Self {
        Self {
            num_row_blocks: 0,
            min_row_block_size: 0,
            max_row_block_size: 0,
            num_col_blocks: 0,
            min_col_block_size: 0,
            max_col_block_size: 0,
            block_density: 0.0,
        }
    }
}

/// Location of one cell: its row-block, column-block and value range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBlock {
    pub row_block: Block,
    pub col_block: Block,
    pub values: Range<usize>,
}

/// Sparse matrix stored as dense blocks on a fixed block pattern
///
/// Derived counts are computed once at construction. The pattern cannot
/// change afterwards; values can be written freely through
/// [`values_mut`](Self::values_mut), [`scale_columns`](Self::scale_columns)
/// and [`set_zero`](Self::set_zero).
#[derive(Debug, Clone)]
pub struct BlockSparseMatrix<T: MatrixElement = f64> {
    num_rows: usize,
    num_cols: usize,
    num_nonzeros: usize,
    values: Vec<T>,
    block_structure: CompressedRowBlockStructure,
    transpose_structure: CompressedColumnBlockStructure,
    /// `row_value_offsets[i]..row_value_offsets[i + 1]` holds row-block `i`
    row_value_offsets: Vec<usize>,
    config: EngineConfig,
}

impl<T: MatrixElement> BlockSparseMatrix<T> {
    /// Take ownership of a block structure and allocate its value buffer
    ///
    /// The buffer is zero-filled. Fails if the structure is inconsistent.
    pub fn new(block_structure: CompressedRowBlockStructure) -> Result<Self, BlockSparseError> {
        Self::new_with_config(block_structure, EngineConfig::default())
    }

    /// Same as [`new`](Self::new) with explicit execution settings
    pub fn new_with_config(
        block_structure: CompressedRowBlockStructure,
        config: EngineConfig,
    ) -> Result<Self, BlockSparseError> {
        let summary = validate_structure(&block_structure)?;

        let duplicates = block_structure.duplicate_cells();
        if duplicates > 0 {
            log::warn!(
                "Block structure repeats {duplicates} (row-block, column-block) pairs; values will be summed"
            );
        }

        let mut row_value_offsets = Vec::with_capacity(block_structure.rows.len() + 1);
        row_value_offsets.extend(
            block_structure
                .rows
                .iter()
                .map(|row| row.cells.first().map_or(usize::MAX, |c| c.value_offset)),
        );
        row_value_offsets.push(summary.num_nonzeros);
        // Rows without cells start where the next row starts
        for i in (0..block_structure.rows.len()).rev() {
            if row_value_offsets[i] == usize::MAX {
                row_value_offsets[i] = row_value_offsets[i + 1];
            }
        }

        let transpose_structure = block_structure.transpose();

        log::debug!(
            "Allocating values array with {} bytes",
            summary.num_nonzeros * T::size_bytes()
        );
        let values = vec![T::ZERO; summary.num_nonzeros];

        Ok(Self {
            num_rows: summary.num_rows,
            num_cols: summary.num_cols,
            num_nonzeros: summary.num_nonzeros,
            values,
            block_structure,
            transpose_structure,
            row_value_offsets,
            config,
        })
    }

    /// Square block-diagonal matrix over the given column partition
    ///
    /// Only the diagonal of each `size x size` block is filled, from
    /// consecutive segments of `diagonal`; off-diagonal entries are zero.
    pub fn create_diagonal_matrix(
        diagonal: &[T],
        column_block_sizes: &[usize],
        column_block_positions: &[usize],
    ) -> Result<Self, BlockSparseError> {
        let structure =
            CompressedRowBlockStructure::block_diagonal(column_block_sizes, column_block_positions)?;
        let mut matrix = Self::new(structure)?;
        if diagonal.len() != matrix.num_cols {
            return Err(BlockSparseError::DimensionMismatch);
        }

        matrix.set_zero();
        let mut values = matrix.values.as_mut_slice();
        let mut diagonal = diagonal;
        for &size in column_block_sizes {
            let (block, rest) = std::mem::take(&mut values).split_at_mut(size * size);
            let (segment, tail) = diagonal.split_at(size);
            for (j, &d) in segment.iter().enumerate() {
                block[j * (size + 1)] = d;
            }
            values = rest;
            diagonal = tail;
        }

        Ok(matrix)
    }

    /// Always fails with [`BlockSparseError::Unsupported`]
    pub fn create_random_matrix(options: &RandomMatrixOptions) -> Result<Self, BlockSparseError> {
        log::debug!(
            "Rejecting random matrix generation ({} x {} blocks)",
            options.num_row_blocks,
            options.num_col_blocks
        );
        Err(BlockSparseError::Unsupported)
    }

    /// Always fails with [`BlockSparseError::Unsupported`]; `self` is untouched
    pub fn append_rows(&mut self, other: &BlockSparseMatrix<T>) -> Result<(), BlockSparseError> {
        log::debug!(
            "Rejecting append of {} row-blocks",
            other.block_structure.num_row_blocks()
        );
        Err(BlockSparseError::Unsupported)
    }

    /// Always fails with [`BlockSparseError::Unsupported`]; `self` is untouched
    pub fn delete_row_blocks(&mut self, delta_row_blocks: usize) -> Result<(), BlockSparseError> {
        log::debug!("Rejecting deletion of {delta_row_blocks} trailing row-blocks");
        Err(BlockSparseError::Unsupported)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn num_nonzeros(&self) -> usize {
        self.num_nonzeros
    }

    pub fn num_row_blocks(&self) -> usize {
        self.block_structure.num_row_blocks()
    }

    pub fn num_col_blocks(&self) -> usize {
        self.block_structure.num_col_blocks()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Raw bytes of the value buffer
    pub fn values_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.values)
    }

    /// The owned block structure (read-only)
    pub fn block_structure(&self) -> &CompressedRowBlockStructure {
        &self.block_structure
    }

    /// Column-major index over the same value buffer
    pub fn transpose_block_structure(&self) -> &CompressedColumnBlockStructure {
        &self.transpose_structure
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Replace the execution settings
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Value range owned by row-block `row_block_id`
    pub fn row_block_values(&self, row_block_id: usize) -> Range<usize> {
        self.row_value_offsets[row_block_id]..self.row_value_offsets[row_block_id + 1]
    }

    /// Location of cell `cell_index` of row-block `row_block_id`
    pub fn cell_block(&self, row_block_id: usize, cell_index: usize) -> CellBlock {
        let row = &self.block_structure.rows[row_block_id];
        self.locate(row.block, &row.cells[cell_index])
    }

    /// Row-major values of one cell
    pub fn cell_values(&self, row_block_id: usize, cell_index: usize) -> &[T] {
        let range = self.cell_block(row_block_id, cell_index).values;
        &self.values[range]
    }

    /// Row-major values of one cell, mutable
    pub fn cell_values_mut(&mut self, row_block_id: usize, cell_index: usize) -> &mut [T] {
        let range = self.cell_block(row_block_id, cell_index).values;
        &mut self.values[range]
    }

    /// All cells in structure order: row-blocks in order, cells in row order
    pub fn cell_blocks(&self) -> impl Iterator<Item = CellBlock> + '_ {
        self.block_structure
            .rows
            .iter()
            .flat_map(move |row| row.cells.iter().map(move |cell| self.locate(row.block, cell)))
    }

    fn locate(&self, row_block: Block, cell: &blocksparse_core::Cell) -> CellBlock {
        let col_block = self.block_structure.column_block(cell.column_block_id);
        let start = cell.value_offset;
        CellBlock {
            row_block,
            col_block,
            values: start..start + row_block.size * col_block.size,
        }
    }

    /// Give back the block structure and the value buffer
    pub fn into_parts(self) -> (CompressedRowBlockStructure, Vec<T>) {
        (self.block_structure, self.values)
    }

    /// Set every value to zero
    pub fn set_zero(&mut self) {
        self.values.fill(T::ZERO);
    }

    /// `y += A * x`
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != num_cols()` or `y.len() != num_rows()`.
    pub fn right_multiply(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.num_cols, "Input vector size mismatch");
        assert_eq!(y.len(), self.num_rows, "Output vector size mismatch");

        if self.config.use_parallel(self.num_row_blocks()) {
            log::trace!("right_multiply: parallel over {} row-blocks", self.num_row_blocks());
            parallel::right_multiply(self, x, y);
            return;
        }

        for cell in self.cell_blocks() {
            small_blas::matrix_vector_multiply(
                &self.values[cell.values],
                cell.row_block.size,
                cell.col_block.size,
                &x[cell.col_block.range()],
                &mut y[cell.row_block.range()],
            );
        }
    }

    /// `y += A^T * x`
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != num_rows()` or `y.len() != num_cols()`.
    pub fn left_multiply(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.num_rows, "Input vector size mismatch");
        assert_eq!(y.len(), self.num_cols, "Output vector size mismatch");

        if self.config.use_parallel(self.num_row_blocks()) {
            log::trace!("left_multiply: parallel over {} column-blocks", self.num_col_blocks());
            parallel::left_multiply(self, x, y);
            return;
        }

        for cell in self.cell_blocks() {
            small_blas::matrix_transpose_vector_multiply(
                &self.values[cell.values],
                cell.row_block.size,
                cell.col_block.size,
                &x[cell.row_block.range()],
                &mut y[cell.col_block.range()],
            );
        }
    }

    /// Overwrite `x` with the squared 2-norm of every column
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != num_cols()`.
    pub fn squared_column_norm(&self, x: &mut [T]) {
        assert_eq!(x.len(), self.num_cols, "Output vector size mismatch");
        x.fill(T::ZERO);

        if self.config.use_parallel(self.num_row_blocks()) {
            log::trace!(
                "squared_column_norm: parallel over {} column-blocks",
                self.num_col_blocks()
            );
            parallel::squared_column_norm(self, x);
            return;
        }

        for cell in self.cell_blocks() {
            small_blas::squared_column_norm(
                &self.values[cell.values],
                cell.row_block.size,
                cell.col_block.size,
                &mut x[cell.col_block.range()],
            );
        }
    }

    /// Multiply every column `j` by `scale[j]` in place
    ///
    /// # Panics
    ///
    /// Panics if `scale.len() != num_cols()`.
    pub fn scale_columns(&mut self, scale: &[T]) {
        assert_eq!(scale.len(), self.num_cols, "Scale vector size mismatch");

        if self.config.use_parallel(self.num_row_blocks()) {
            log::trace!("scale_columns: parallel over {} row-blocks", self.num_row_blocks());
            parallel::scale_columns(self, scale);
            return;
        }

        let bs = &self.block_structure;
        for row in &bs.rows {
            for cell in &row.cells {
                let col_block = bs.column_block(cell.column_block_id);
                let start = cell.value_offset;
                small_blas::scale_columns(
                    &mut self.values[start..start + row.block.size * col_block.size],
                    row.block.size,
                    col_block.size,
                    &scale[col_block.range()],
                );
            }
        }
    }
}

impl<T: MatrixElement> LinearOperator for BlockSparseMatrix<T> {
    type Element = T;

    fn right_multiply(&self, x: &[T], y: &mut [T]) {
        BlockSparseMatrix::right_multiply(self, x, y)
    }

    fn left_multiply(&self, x: &[T], y: &mut [T]) {
        BlockSparseMatrix::left_multiply(self, x, y)
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }
}

impl<T: MatrixElement> SparseMatrix for BlockSparseMatrix<T> {
    fn squared_column_norm(&self, x: &mut [T]) {
        BlockSparseMatrix::squared_column_norm(self, x)
    }

    fn scale_columns(&mut self, scale: &[T]) {
        BlockSparseMatrix::scale_columns(self, scale)
    }

    fn set_zero(&mut self) {
        BlockSparseMatrix::set_zero(self)
    }

    fn num_nonzeros(&self) -> usize {
        self.num_nonzeros
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }
}
