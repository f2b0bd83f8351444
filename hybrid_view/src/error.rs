//! Error types for hybrid_view
//!
//! This module defines the error types shared by the camera projection model
//! and the 2D affine matrix.

use std::fmt;

/// Result type for hybrid_view operations
pub type Result<T> = std::result::Result<T, Error>;

/// hybrid_view errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Matrix cannot be inverted (determinant is exactly zero)
    SingularMatrix {
        /// Determinant of the offending matrix
        determinant: f32,
    },

    /// Projection matrix contains non-finite values or cannot be inverted
    DegenerateProjection(String),

    /// Projection mode name not recognised
    UnknownProjectionMode(String),

    /// Fit policy name not recognised
    UnknownFit(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SingularMatrix { determinant } => {
                write!(f, "Singular matrix: determinant is {}", determinant)
            }
            Error::DegenerateProjection(msg) => write!(f, "Degenerate projection: {}", msg),
            Error::UnknownProjectionMode(name) => write!(f, "Unknown projection mode: {}", name),
            Error::UnknownFit(name) => write!(f, "Unknown fit: {}", name),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
