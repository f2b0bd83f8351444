/// Frustum: six clipping planes extracted from a projection matrix.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Built from `HybridCamera::projection_matrix()` the planes are in camera
/// space; built from a view-projection matrix they are in world space.

use glam::{Mat4, Vec3, Vec4};
use super::host::CoordinateSystem;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes: left, right, bottom, top, near, far.
///
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a (view-)projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. The near plane depends on the
    /// clip-space depth range: `z >= -w` for OpenGL, `z >= 0` for WebGPU.
    pub fn from_projection(m: &Mat4, coordinate_system: CoordinateSystem) -> Self {
        let row0 = m.row(0);
        let row1 = m.row(1);
        let row2 = m.row(2);
        let row3 = m.row(3);

        let near = match coordinate_system {
            CoordinateSystem::OpenGl => row3 + row2,
            CoordinateSystem::WebGpu => row2,
        };

        let mut planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            near,
            row3 - row2, // far
        ];

        // Normalize each plane so that (A, B, C) is a unit vector
        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to plane `index` (positive = inside).
    pub fn signed_distance(&self, index: usize, point: Vec3) -> f32 {
        let plane = self.planes[index];
        plane.truncate().dot(point) + plane.w
    }

    /// `true` if `point` is on the inner side of all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..self.planes.len()).all(|index| self.signed_distance(index, point) >= 0.0)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
