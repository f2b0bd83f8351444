/// Decomposition targets for `Matrix2`.
///
/// A `TransformTarget` is anything that holds a 2D position/rotation/scale
/// triple (a 2D node, a sprite, an editor gizmo). Every slot is optional:
/// the default implementations ignore the value.

use glam::Vec2;
use super::matrix2::Matrix2;

/// Receiver of `Matrix2::decompose`.
pub trait TransformTarget {
    /// Receive the translation.
    fn set_position(&mut self, _position: Vec2) {}

    /// Receive the rotation in radians.
    fn set_rotation(&mut self, _rotation: f32) {}

    /// Receive the per-axis scale.
    fn set_scale(&mut self, _scale: Vec2) {}
}

/// Decomposed parts of a `Matrix2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub shear: f32,
}

/// Plain position/rotation/scale triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    /// Radians
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2D {
    /// Compose into a matrix (rotation about the local origin).
    pub fn to_matrix(&self) -> Matrix2 {
        Matrix2::from_compose(self.position, self.scale, Vec2::ZERO, self.rotation)
    }
}

impl TransformTarget for Transform2D {
    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
}
