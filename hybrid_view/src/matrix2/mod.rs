//! 2D affine matrix module.
//!
//! `Matrix2` stores a 2x2 linear part plus a translation as six scalars and
//! provides composition, decomposition, inversion and point transformation.
//! Decomposition results can be written into any `TransformTarget`.

mod matrix2;
mod transform;

pub use matrix2::Matrix2;
pub use transform::{Decomposition, Transform2D, TransformTarget};
