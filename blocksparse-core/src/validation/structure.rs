//! Structural consistency checks for block structure descriptors

use crate::structure::CompressedRowBlockStructure;
use crate::validation::bounds::checked_block_len;
use crate::BlockSparseError;

/// Scalar counts derived from a valid block structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureSummary {
    pub num_rows: usize,
    pub num_cols: usize,
    pub num_nonzeros: usize,
}

/// Validate a block structure and derive its scalar counts
///
/// Checks that column-block and row-block positions are exclusive
/// prefix sums of their sizes, that every cell references an existing
/// column-block, and that cell value offsets tile `0..num_nonzeros` in
/// structure order.
pub fn validate_structure(
    bs: &CompressedRowBlockStructure,
) -> Result<StructureSummary, BlockSparseError> {
    if bs.column_block_sizes.len() != bs.column_block_positions.len() {
        return Err(BlockSparseError::InvalidColumnPositions);
    }

    let mut num_cols = 0usize;
    for (&size, &position) in bs.column_block_sizes.iter().zip(&bs.column_block_positions) {
        if position != num_cols {
            return Err(BlockSparseError::InvalidColumnPositions);
        }
        num_cols = num_cols
            .checked_add(size)
            .ok_or(BlockSparseError::SizeOverflow)?;
    }

    let mut num_rows = 0usize;
    let mut num_nonzeros = 0usize;
    for row in &bs.rows {
        if row.block.position != num_rows {
            return Err(BlockSparseError::InvalidRowPosition);
        }
        num_rows = num_rows
            .checked_add(row.block.size)
            .ok_or(BlockSparseError::SizeOverflow)?;

        for cell in &row.cells {
            let column_block_size = *bs
                .column_block_sizes
                .get(cell.column_block_id)
                .ok_or(BlockSparseError::ColumnBlockOutOfRange)?;
            if cell.value_offset != num_nonzeros {
                return Err(BlockSparseError::CellOffsetMismatch);
            }
            num_nonzeros = num_nonzeros
                .checked_add(checked_block_len(row.block.size, column_block_size)?)
                .ok_or(BlockSparseError::SizeOverflow)?;
        }
    }

    Ok(StructureSummary {
        num_rows,
        num_cols,
        num_nonzeros,
    })
}
