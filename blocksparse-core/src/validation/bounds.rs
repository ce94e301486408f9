//! Size and range validation with overflow protection

use alloc::vec::Vec;

use crate::BlockSparseError;

/// Number of values in a `num_rows x num_cols` block
pub const fn checked_block_len(num_rows: usize, num_cols: usize) -> Result<usize, BlockSparseError> {
    match num_rows.checked_mul(num_cols) {
        Some(len) => Ok(len),
        None => Err(BlockSparseError::SizeOverflow),
    }
}

/// Exclusive prefix sum of block sizes, i.e. the block positions
pub fn exclusive_prefix_sum(sizes: &[usize]) -> Result<Vec<usize>, BlockSparseError> {
    let mut positions = Vec::with_capacity(sizes.len());
    let mut position = 0usize;
    for &size in sizes {
        positions.push(position);
        position = position
            .checked_add(size)
            .ok_or(BlockSparseError::SizeOverflow)?;
    }
    Ok(positions)
}

/// Validate that `start..start + len` lies inside `0..total`
pub const fn validate_range(start: usize, len: usize, total: usize) -> Result<(), BlockSparseError> {
    match start.checked_add(len) {
        Some(end) if end <= total => Ok(()),
        _ => Err(BlockSparseError::DimensionMismatch),
    }
}

/// Validate that a vector has the expected length
pub const fn validate_vector_len(len: usize, expected: usize) -> Result<(), BlockSparseError> {
    if len != expected {
        return Err(BlockSparseError::DimensionMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_checked_block_len() {
        assert_eq!(checked_block_len(3, 4), Ok(12));
        assert_eq!(checked_block_len(0, 4), Ok(0));
        assert_eq!(
            checked_block_len(usize::MAX, 2),
            Err(BlockSparseError::SizeOverflow)
        );
    }

    #[test]
    fn test_exclusive_prefix_sum() {
        assert_eq!(exclusive_prefix_sum(&[2, 1, 3]), Ok(vec![0, 2, 3]));
        assert_eq!(exclusive_prefix_sum(&[]), Ok(vec![]));
        assert_eq!(
            exclusive_prefix_sum(&[usize::MAX, 1, 1]),
            Err(BlockSparseError::SizeOverflow)
        );
    }

    #[test]
    fn test_validate_range() {
        assert_eq!(validate_range(0, 10, 10), Ok(()));
        assert_eq!(validate_range(10, 0, 10), Ok(()));
        assert_eq!(
            validate_range(5, 6, 10),
            Err(BlockSparseError::DimensionMismatch)
        );
        assert_eq!(
            validate_range(usize::MAX, 2, 10),
            Err(BlockSparseError::DimensionMismatch)
        );
    }

    #[test]
    fn test_validate_vector_len() {
        assert_eq!(validate_vector_len(3, 3), Ok(()));
        assert_eq!(
            validate_vector_len(2, 3),
            Err(BlockSparseError::DimensionMismatch)
        );
    }
}
