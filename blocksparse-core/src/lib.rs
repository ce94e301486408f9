#![no_std]

//! Blocksparse Core - block structure descriptors and dense block kernels
//!
//! This crate holds the parts of a block-sparse Jacobian that do not need
//! the standard library: the sparsity pattern, its validation, the
//! per-block arithmetic kernels and the matrix traits.

extern crate alloc;

pub mod error;
pub mod small_blas;
pub mod structure;
pub mod traits;
pub mod validation;

pub use error::*;
pub use structure::{
    Block, BlockStructureBuilder, Cell, ColumnCell, CompressedColumn,
    CompressedColumnBlockStructure, CompressedRow, CompressedRowBlockStructure,
};
pub use traits::*;
pub use validation::{validate_structure, StructureSummary};
