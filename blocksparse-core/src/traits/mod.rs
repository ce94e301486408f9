//! Abstract interfaces for block-sparse matrices
//!
//! This module defines the trait abstractions shared by the engine
//! and its export formats. Traits are pure interfaces.

pub mod element;
pub mod matrix;

pub use element::MatrixElement;
pub use matrix::{LinearOperator, SparseMatrix};
