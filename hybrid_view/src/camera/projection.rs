/// Off-center projection matrices.
///
/// glam only builds symmetric perspective frusta; view-offset tiles need
/// arbitrary left/right/top/bottom bounds, for both depth conventions.

use glam::{Mat4, Vec4};
use super::host::CoordinateSystem;

/// Right-handed perspective frustum with arbitrary near-plane bounds.
pub fn perspective_off_center(
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    near: f32,
    far: f32,
    coordinate_system: CoordinateSystem,
) -> Mat4 {
    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);

    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);

    let (c, d) = match coordinate_system {
        CoordinateSystem::OpenGl => (
            -(far + near) / (far - near),
            -2.0 * far * near / (far - near),
        ),
        CoordinateSystem::WebGpu => (
            -far / (far - near),
            -far * near / (far - near),
        ),
    };

    Mat4::from_cols(
        Vec4::new(x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y, 0.0, 0.0),
        Vec4::new(a, b, c, -1.0),
        Vec4::new(0.0, 0.0, d, 0.0),
    )
}

/// Right-handed orthographic box with arbitrary bounds.
pub fn orthographic_off_center(
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    near: f32,
    far: f32,
    coordinate_system: CoordinateSystem,
) -> Mat4 {
    let w = 1.0 / (right - left);
    let h = 1.0 / (top - bottom);
    let p = 1.0 / (far - near);

    let x = (right + left) * w;
    let y = (top + bottom) * h;

    let (z, z_scale) = match coordinate_system {
        CoordinateSystem::OpenGl => ((far + near) * p, -2.0 * p),
        CoordinateSystem::WebGpu => (near * p, -p),
    };

    Mat4::from_cols(
        Vec4::new(2.0 * w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * h, 0.0, 0.0),
        Vec4::new(0.0, 0.0, z_scale, 0.0),
        Vec4::new(-x, -y, -z, 1.0),
    )
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
