//! Blocksparse - block-sparse Jacobian storage for least-squares solvers
//!
//! A block-sparse matrix stores every nonzero block of a Jacobian as a
//! small dense row-major block inside one flat value buffer, addressed by
//! a fixed [`CompressedRowBlockStructure`]. Iterative solvers use it for
//! the products `y += A x` and `y += A^T x`, column norms and column
//! scaling without ever materializing a general sparse matrix.
//!
//! ## Architecture
//!
//! - **blocksparse-core**: block structure, validation, dense block kernels
//!   and matrix traits (`no_std`, no I/O)
//! - **blocksparse**: the matrix engine, rayon execution paths and
//!   conversions to dense, triplet, CSR and text forms
//!
//! ## Quick Start
//!
//! ```rust
//! use blocksparse::{BlockSparseMatrix, BlockStructureBuilder};
//!
//! fn example() -> Result<(), blocksparse::Error> {
//!     let structure = BlockStructureBuilder::new(&[2, 3])?
//!         .with_row(1, &[0, 1])?
//!         .with_row(2, &[1])?
//!         .build();
//!     let mut matrix = BlockSparseMatrix::<f64>::new(structure)?;
//!     matrix.values_mut().fill(1.0);
//!
//!     let x = vec![1.0; matrix.num_cols()];
//!     let mut y = vec![0.0; matrix.num_rows()];
//!     matrix.right_multiply(&x, &mut y);
//!     assert_eq!(y, [5.0, 3.0, 3.0]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub use blocksparse_core::{
    // Structure
    Block, BlockStructureBuilder, Cell, ColumnCell, CompressedColumn,
    CompressedColumnBlockStructure, CompressedRow, CompressedRowBlockStructure,
    // Traits
    LinearOperator, MatrixElement, SparseMatrix,
    // Error handling
    BlockSparseError, ErrorCategory,
    // Validation
    validate_structure, StructureSummary,
};

pub mod block_sparse_matrix;
pub mod compressed_row;
pub mod config;
pub mod error;
#[cfg(feature = "serde")]
pub mod json;
pub mod triplet;

pub use block_sparse_matrix::{BlockSparseMatrix, CellBlock, RandomMatrixOptions};
pub use compressed_row::CompressedRowSparseMatrix;
pub use config::EngineConfig;
pub use error::{Error, Result};
#[cfg(feature = "serde")]
pub use json::{read_structure_json, structure_from_json, structure_to_json, write_structure_json};
pub use triplet::TripletSparseMatrix;
