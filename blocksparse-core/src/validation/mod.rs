//! Validation utilities for block structures
//!
//! Pure functions with no I/O: checked size arithmetic and structural
//! consistency checks run before a value buffer is allocated.

pub mod bounds;
pub mod structure;

pub use bounds::{checked_block_len, exclusive_prefix_sum, validate_range, validate_vector_len};
pub use structure::{validate_structure, StructureSummary};
