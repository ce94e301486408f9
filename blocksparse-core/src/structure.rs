//! Block structure descriptors
//!
//! A block structure describes the sparsity pattern of a block-sparse
//! matrix independently of its values. Columns are partitioned into
//! column-blocks; every row-block lists the cells (nonzero dense blocks)
//! it owns, and each cell records where its row-major values start in
//! the flat value buffer.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashSet;

use crate::error::{BlockSparseError, Result};
use crate::validation::bounds::{checked_block_len, exclusive_prefix_sum};

/// A contiguous range of scalar rows or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Number of scalar rows or columns in the block
    pub size: usize,
    /// Global index of the first scalar row or column
    pub position: usize,
}

impl Block {
    /// Create a new block
    pub const fn new(size: usize, position: usize) -> Self {
        Self { size, position }
    }

    /// Global scalar indices covered by this block
    pub const fn range(&self) -> Range<usize> {
        self.position..self.position + self.size
    }
}

/// One nonzero dense block inside a row-block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Index into the column-block list
    pub column_block_id: usize,
    /// Index of the cell's first value in the value buffer
    pub value_offset: usize,
}

impl Cell {
    /// Create a new cell
    pub const fn new(column_block_id: usize, value_offset: usize) -> Self {
        Self {
            column_block_id,
            value_offset,
        }
    }
}

/// A row-block and its cells, in caller-defined order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedRow {
    pub block: Block,
    pub cells: Vec<Cell>,
}

impl CompressedRow {
    /// Create a row-block with no cells
    pub const fn new(block: Block) -> Self {
        Self {
            block,
            cells: Vec::new(),
        }
    }
}

/// Row-major block sparsity pattern
///
/// `column_block_positions` must be the exclusive prefix sum of
/// `column_block_sizes`, row-block positions the exclusive prefix sum of
/// the row-block sizes, and the cells, visited in order, must tile the
/// value buffer without gaps. [`crate::validate_structure`] checks all
/// of this.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedRowBlockStructure {
    pub column_block_sizes: Vec<usize>,
    pub column_block_positions: Vec<usize>,
    pub rows: Vec<CompressedRow>,
}

impl CompressedRowBlockStructure {
    /// Create a structure with the given column partition and no rows
    pub fn new(column_block_sizes: Vec<usize>) -> Result<Self> {
        let column_block_positions = exclusive_prefix_sum(&column_block_sizes)?;
        Ok(Self {
            column_block_sizes,
            column_block_positions,
            rows: Vec::new(),
        })
    }

    /// Square block-diagonal pattern over an existing column partition
    ///
    /// One row-block per column-block, each holding a single square cell.
    /// Cell values are laid out back to back.
    pub fn block_diagonal(
        column_block_sizes: &[usize],
        column_block_positions: &[usize],
    ) -> Result<Self> {
        if column_block_sizes.len() != column_block_positions.len() {
            return Err(BlockSparseError::InvalidColumnPositions);
        }

        let mut rows = Vec::with_capacity(column_block_sizes.len());
        let mut value_offset = 0usize;
        for (id, (&size, &position)) in column_block_sizes
            .iter()
            .zip(column_block_positions)
            .enumerate()
        {
            let mut row = CompressedRow::new(Block::new(size, position));
            row.cells.push(Cell::new(id, value_offset));
            value_offset = value_offset
                .checked_add(checked_block_len(size, size)?)
                .ok_or(BlockSparseError::SizeOverflow)?;
            rows.push(row);
        }

        Ok(Self {
            column_block_sizes: column_block_sizes.to_vec(),
            column_block_positions: column_block_positions.to_vec(),
            rows,
        })
    }

    /// Number of row-blocks
    pub fn num_row_blocks(&self) -> usize {
        self.rows.len()
    }

    /// Number of column-blocks
    pub fn num_col_blocks(&self) -> usize {
        self.column_block_sizes.len()
    }

    /// Column-block `id` as a [`Block`]
    pub fn column_block(&self, id: usize) -> Block {
        Block::new(
            self.column_block_sizes[id],
            self.column_block_positions[id],
        )
    }

    /// Total number of cells across all row-blocks
    pub fn num_cells(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    /// Count cells whose (row-block, column-block) pair already appeared
    /// earlier in the same row-block
    ///
    /// Repeated pairs are legal and contribute additively.
    pub fn duplicate_cells(&self) -> usize {
        let mut seen = HashSet::new();
        let mut duplicates = 0;
        for (row_block_id, row) in self.rows.iter().enumerate() {
            for cell in &row.cells {
                if !seen.insert((row_block_id, cell.column_block_id)) {
                    duplicates += 1;
                }
            }
        }
        duplicates
    }

    /// Build the column-major view of this pattern
    ///
    /// Cells of each column-block are listed in row-block order and keep
    /// their value offsets, so the transpose indexes the same buffer.
    /// Column ids must be in range; call [`crate::validate_structure`] first.
    pub fn transpose(&self) -> CompressedColumnBlockStructure {
        let mut cols: Vec<CompressedColumn> = self
            .column_block_sizes
            .iter()
            .zip(&self.column_block_positions)
            .map(|(&size, &position)| CompressedColumn::new(Block::new(size, position)))
            .collect();

        for (row_block_id, row) in self.rows.iter().enumerate() {
            for cell in &row.cells {
                cols[cell.column_block_id]
                    .cells
                    .push(ColumnCell::new(row_block_id, cell.value_offset));
            }
        }

        CompressedColumnBlockStructure {
            row_blocks: self.rows.iter().map(|row| row.block).collect(),
            cols,
        }
    }
}

/// One nonzero dense block seen from its column-block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnCell {
    /// Index into the row-block list
    pub row_block_id: usize,
    /// Index of the cell's first value in the value buffer (row-major)
    pub value_offset: usize,
}

impl ColumnCell {
    pub const fn new(row_block_id: usize, value_offset: usize) -> Self {
        Self {
            row_block_id,
            value_offset,
        }
    }
}

/// A column-block and the cells that reference it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompressedColumn {
    pub block: Block,
    pub cells: Vec<ColumnCell>,
}

impl CompressedColumn {
    pub const fn new(block: Block) -> Self {
        Self {
            block,
            cells: Vec::new(),
        }
    }
}

/// Column-major index over a [`CompressedRowBlockStructure`]
///
/// Lets transpose products be split by output column-block, so no two
/// units of work write the same range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompressedColumnBlockStructure {
    pub row_blocks: Vec<Block>,
    pub cols: Vec<CompressedColumn>,
}

/// Builder for block structures with sequential value offsets
pub struct BlockStructureBuilder {
    structure: CompressedRowBlockStructure,
    next_row_position: usize,
    next_value_offset: usize,
}

impl BlockStructureBuilder {
    /// Create a builder over the given column partition
    pub fn new(column_block_sizes: &[usize]) -> Result<Self> {
        Ok(Self {
            structure: CompressedRowBlockStructure::new(column_block_sizes.to_vec())?,
            next_row_position: 0,
            next_value_offset: 0,
        })
    }

    /// Append a row-block of `size` rows with one cell per listed column-block
    pub fn with_row(mut self, size: usize, column_block_ids: &[usize]) -> Result<Self> {
        let mut row = CompressedRow::new(Block::new(size, self.next_row_position));
        row.cells.reserve(column_block_ids.len());

        for &column_block_id in column_block_ids {
            let column_block_size = *self
                .structure
                .column_block_sizes
                .get(column_block_id)
                .ok_or(BlockSparseError::ColumnBlockOutOfRange)?;
            row.cells
                .push(Cell::new(column_block_id, self.next_value_offset));
            self.next_value_offset = self
                .next_value_offset
                .checked_add(checked_block_len(size, column_block_size)?)
                .ok_or(BlockSparseError::SizeOverflow)?;
        }

        self.next_row_position = self
            .next_row_position
            .checked_add(size)
            .ok_or(BlockSparseError::SizeOverflow)?;
        self.structure.rows.push(row);
        Ok(self)
    }

    /// Finish building
    pub fn build(self) -> CompressedRowBlockStructure {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn two_by_three() -> CompressedRowBlockStructure {
        // Column blocks of size 2, 1, 3; row 0 touches {0, 2}, row 1 touches {1}
        BlockStructureBuilder::new(&[2, 1, 3])
            .and_then(|b| b.with_row(2, &[0, 2]))
            .and_then(|b| b.with_row(1, &[1]))
            .map(|b| b.build())
            .unwrap()
    }

    #[test]
    fn test_builder_offsets() {
        let bs = two_by_three();
        assert_eq!(bs.column_block_positions, vec![0, 2, 3]);
        assert_eq!(bs.rows[0].block, Block::new(2, 0));
        assert_eq!(bs.rows[1].block, Block::new(1, 2));
        assert_eq!(bs.rows[0].cells, vec![Cell::new(0, 0), Cell::new(2, 4)]);
        assert_eq!(bs.rows[1].cells, vec![Cell::new(1, 10)]);
        assert_eq!(bs.num_cells(), 3);
    }

    #[test]
    fn test_builder_rejects_unknown_column_block() {
        let result = BlockStructureBuilder::new(&[2]).and_then(|b| b.with_row(1, &[1]));
        assert_eq!(result.err(), Some(BlockSparseError::ColumnBlockOutOfRange));
    }

    #[test]
    fn test_block_diagonal_layout() {
        let bs = CompressedRowBlockStructure::block_diagonal(&[2, 1], &[0, 2]).unwrap();
        assert_eq!(bs.num_row_blocks(), 2);
        assert_eq!(bs.rows[0].block, Block::new(2, 0));
        assert_eq!(bs.rows[0].cells, vec![Cell::new(0, 0)]);
        assert_eq!(bs.rows[1].block, Block::new(1, 2));
        assert_eq!(bs.rows[1].cells, vec![Cell::new(1, 4)]);
    }

    #[test]
    fn test_transpose_keeps_row_order() {
        let bs = BlockStructureBuilder::new(&[1, 1])
            .and_then(|b| b.with_row(1, &[1, 0]))
            .and_then(|b| b.with_row(2, &[1]))
            .map(|b| b.build())
            .unwrap();

        let ts = bs.transpose();
        assert_eq!(ts.row_blocks, vec![Block::new(1, 0), Block::new(2, 1)]);
        assert_eq!(ts.cols[0].cells, vec![ColumnCell::new(0, 1)]);
        assert_eq!(
            ts.cols[1].cells,
            vec![ColumnCell::new(0, 0), ColumnCell::new(1, 2)]
        );
    }

    #[test]
    fn test_duplicate_cells() {
        assert_eq!(two_by_three().duplicate_cells(), 0);

        let bs = BlockStructureBuilder::new(&[1, 1])
            .and_then(|b| b.with_row(1, &[0, 1, 0]))
            .and_then(|b| b.with_row(1, &[0]))
            .map(|b| b.build())
            .unwrap();
        assert_eq!(bs.duplicate_cells(), 1);
    }
}
