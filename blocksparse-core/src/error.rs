//! Error types for block-sparse matrix operations

/// Errors that can occur while building or operating on a block-sparse matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSparseError {
    /// Column-block positions are not the exclusive prefix sum of the sizes
    InvalidColumnPositions,
    /// A row-block position does not follow the previous row-blocks
    InvalidRowPosition,
    /// A cell references a column-block that does not exist
    ColumnBlockOutOfRange,
    /// A cell's value offset leaves a gap or overlaps another cell
    CellOffsetMismatch,
    /// A derived count does not fit in `usize`
    SizeOverflow,
    /// Input sizes disagree with the matrix shape
    DimensionMismatch,
    /// The operation is not supported by this matrix type
    Unsupported,
}

/// Broad grouping of [`BlockSparseError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The block structure descriptor is malformed
    Structure,
    /// Sizes passed by the caller do not match
    Dimension,
    /// The operation is rejected unconditionally
    Unsupported,
}

impl BlockSparseError {
    /// Get the category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            BlockSparseError::InvalidColumnPositions
            | BlockSparseError::InvalidRowPosition
            | BlockSparseError::ColumnBlockOutOfRange
            | BlockSparseError::CellOffsetMismatch
            | BlockSparseError::SizeOverflow => ErrorCategory::Structure,
            BlockSparseError::DimensionMismatch => ErrorCategory::Dimension,
            BlockSparseError::Unsupported => ErrorCategory::Unsupported,
        }
    }
}

impl core::fmt::Display for BlockSparseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            BlockSparseError::InvalidColumnPositions => {
                "Column-block positions are not the prefix sum of column-block sizes"
            }
            BlockSparseError::InvalidRowPosition => {
                "Row-block position is not the prefix sum of preceding row-block sizes"
            }
            BlockSparseError::ColumnBlockOutOfRange => "Cell references an unknown column-block",
            BlockSparseError::CellOffsetMismatch => {
                "Cell value offsets do not partition the value buffer"
            }
            BlockSparseError::SizeOverflow => "Matrix size calculation overflowed",
            BlockSparseError::DimensionMismatch => "Dimension mismatch",
            BlockSparseError::Unsupported => "Unsupported operation",
        };
        write!(f, "{msg}")
    }
}

/// Result type for block-sparse operations
pub type Result<T> = core::result::Result<T, BlockSparseError>;
