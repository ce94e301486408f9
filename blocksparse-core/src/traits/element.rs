//! Scalar type constraints for block-sparse values
//!
//! This module defines the trait that constrains what types can be
//! stored in the value buffer of a block-sparse matrix.

use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

/// Trait for types that can be stored as matrix values
///
/// Values live in one flat buffer that is also exposed as raw bytes, so
/// every element type must be plain old data (`bytemuck::Pod`). The
/// arithmetic bounds are what the dense block kernels need.
pub trait MatrixElement:
    bytemuck::Pod
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + MulAssign
    + Send
    + Sync
{
    /// Additive identity
    const ZERO: Self;

    /// Multiplicative identity
    const ONE: Self;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;
}

macro_rules! impl_matrix_element {
    ($t:ty) => {
        impl MatrixElement for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_matrix_element!(f32);
impl_matrix_element!(f64);
