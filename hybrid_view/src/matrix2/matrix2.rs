/// Matrix2: 2D affine transform stored as six scalars.
///
/// `[a, b, c, d, tx, ty]` encodes the map
/// `(x, y) -> (a*x + c*y + tx, b*x + d*y + ty)`, i.e. a column-major 3x2
/// matrix whose columns are the X basis, the Y basis and the origin.
///
/// Mutating operations work in place and return `&mut Self` for chaining.
/// Products, inverses and decompositions are returned as new values.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::ops::Mul;
use glam::{Affine2, Mat2, Mat3, Vec2};
use crate::error::{Error, Result};
use super::transform::{Decomposition, TransformTarget};

const SOURCE: &str = "hybrid_view::Matrix2";

/// 2D affine matrix (linear part + translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    /// X basis, x component
    pub a: f32,
    /// X basis, y component
    pub b: f32,
    /// Y basis, x component
    pub c: f32,
    /// Y basis, y component
    pub d: f32,
    /// Translation x
    pub tx: f32,
    /// Translation y
    pub ty: f32,
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2 {
    /// `[1, 0, 0, 1, 0, 0]`
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Create a matrix from its six components.
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Create a matrix from an ordered `[a, b, c, d, tx, ty]` array.
    pub const fn from_array(values: [f32; 6]) -> Self {
        Self::new(values[0], values[1], values[2], values[3], values[4], values[5])
    }

    /// The six components as `[a, b, c, d, tx, ty]`.
    pub const fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }

    /// Pure translation.
    pub fn from_translation(translation: impl Into<Vec2>) -> Self {
        let t = translation.into();
        Self::new(1.0, 0.0, 0.0, 1.0, t.x, t.y)
    }

    /// Pure rotation (radians, counter-clockwise for a Y-up frame).
    pub fn from_rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Pure per-axis scale.
    pub fn from_scale(scale: impl Into<Vec2>) -> Self {
        let s = scale.into();
        Self::new(s.x, 0.0, 0.0, s.y, 0.0, 0.0)
    }

    /// Build a matrix with `compose` starting from identity.
    pub fn from_compose(
        position: impl Into<Vec2>,
        scale: impl Into<Vec2>,
        origin: impl Into<Vec2>,
        rotation: f32,
    ) -> Self {
        let mut matrix = Self::IDENTITY;
        matrix.compose(position, scale, origin, rotation);
        matrix
    }

    // ===== COMPOSITION =====

    /// Reset to identity.
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// `self = self * other`: the result applies `other` first, then the
    /// original `self`.
    pub fn multiply(&mut self, other: &Matrix2) -> &mut Self {
        *self = concat(self, other);
        self
    }

    /// `self = other * self`: the result applies the original `self` first,
    /// then `other`.
    pub fn premultiply(&mut self, other: &Matrix2) -> &mut Self {
        *self = concat(other, self);
        self
    }

    /// Overwrite with `T(position) * T(origin) * R(rotation) * T(-origin) * S(scale)`.
    ///
    /// The rotation sandwich is skipped when `rotation == 0` and the scale
    /// when it is `(1, 1)`; both are identities in that case, so the result
    /// is the same as applying all factors.
    pub fn compose(
        &mut self,
        position: impl Into<Vec2>,
        scale: impl Into<Vec2>,
        origin: impl Into<Vec2>,
        rotation: f32,
    ) -> &mut Self {
        let scale = scale.into();
        let origin = origin.into();

        *self = Self::from_translation(position);

        if rotation != 0.0 {
            self.multiply(&Self::from_translation(origin));
            self.multiply(&Self::from_rotation(rotation));
            self.multiply(&Self::from_translation(-origin));
        }

        if scale != Vec2::ONE {
            self.scale(scale);
        }

        self
    }

    /// Add a translation expressed in the matrix's own basis
    /// (post-multiply by a translation).
    pub fn translate(&mut self, offset: impl Into<Vec2>) -> &mut Self {
        let o = offset.into();
        self.tx += self.a * o.x + self.c * o.y;
        self.ty += self.b * o.x + self.d * o.y;
        self
    }

    /// Post-multiply by a rotation. Translation is preserved.
    pub fn rotate(&mut self, radians: f32) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);

        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
        self
    }

    /// Scale the X and Y basis columns independently.
    ///
    /// Accepts `(sx, sy)`, `[sx, sy]` or a `Vec2`.
    pub fn scale(&mut self, scale: impl Into<Vec2>) -> &mut Self {
        let s = scale.into();
        self.a *= s.x;
        self.b *= s.x;
        self.c *= s.y;
        self.d *= s.y;
        self
    }

    /// Post-multiply by the shear matrix `[1, tan(ry), tan(rx), 1, 0, 0]`.
    pub fn skew(&mut self, rx: f32, ry: f32) -> &mut Self {
        self.multiply(&Self::new(1.0, ry.tan(), rx.tan(), 1.0, 0.0, 0.0))
    }

    /// Overwrite the translation (not a composition).
    pub fn set_position(&mut self, position: impl Into<Vec2>) -> &mut Self {
        let p = position.into();
        self.tx = p.x;
        self.ty = p.y;
        self
    }

    // ===== DECOMPOSITION =====

    /// Translation `(tx, ty)`.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }

    /// Angle of the X basis column, `atan2(b, a)`.
    pub fn rotation(&self) -> f32 {
        self.b.atan2(self.a)
    }

    /// Length of each basis column.
    ///
    /// Always non-negative: mirroring shows up in `determinant`, not here.
    pub fn scaling(&self) -> Vec2 {
        Vec2::new(self.a.hypot(self.b), self.c.hypot(self.d))
    }

    /// Angular deviation of the Y basis from perpendicular-to-X, net of the
    /// overall rotation, wrapped to `(-π, π]`.
    ///
    /// Zero for rotation combined with any positive scale.
    pub fn shear(&self) -> f32 {
        wrap_angle(self.d.atan2(self.c) - FRAC_PI_2 - self.rotation())
    }

    /// Per-axis sign of `a` and `d` (`-1`, `0` or `1`).
    ///
    /// Coarse heuristic: a rotation past 90° flips both signs without any
    /// mirroring. Use `determinant() < 0` to detect a reflection.
    pub fn sign(&self) -> Vec2 {
        Vec2::new(sign_of(self.a), sign_of(self.d))
    }

    /// `a*d - b*c`. Negative when the map contains a reflection, zero when
    /// it is not invertible.
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Position, rotation, scale and shear as a value.
    pub fn decomposition(&self) -> Decomposition {
        Decomposition {
            position: self.position(),
            rotation: self.rotation(),
            scale: self.scaling(),
            shear: self.shear(),
        }
    }

    /// Write position, rotation and scale into `target`. `None` is a no-op.
    pub fn decompose(&self, target: Option<&mut dyn TransformTarget>) -> &Self {
        if let Some(target) = target {
            target.set_position(self.position());
            target.set_rotation(self.rotation());
            target.set_scale(self.scaling());
        }
        self
    }

    // ===== INVERSION =====

    /// Inverse as a new matrix.
    ///
    /// A singular matrix (determinant exactly zero) is reported with a
    /// warning and the result holds infinities/NaN. Use `try_inverse` to
    /// get an error instead.
    pub fn inverse(&self) -> Matrix2 {
        let det = self.determinant();
        if det == 0.0 {
            crate::view_warn!(SOURCE, "Matrix {} is not invertible (determinant is 0)", self);
        }
        self.inverse_with_determinant(det)
    }

    /// Inverse as a new matrix, or `Error::SingularMatrix`.
    pub fn try_inverse(&self) -> Result<Matrix2> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(Error::SingularMatrix { determinant: det });
        }
        Ok(self.inverse_with_determinant(det))
    }

    fn inverse_with_determinant(&self, det: f32) -> Matrix2 {
        Matrix2::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
            (self.c * self.ty - self.d * self.tx) / det,
            (self.b * self.tx - self.a * self.ty) / det,
        )
    }

    // ===== APPLICATION =====

    /// Apply the full affine map. Accepts `(x, y)`, `[x, y]` or a `Vec2`.
    pub fn transform_point(&self, point: impl Into<Vec2>) -> Vec2 {
        let p = point.into();
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Apply the linear part only (directions, extents).
    pub fn transform_vector(&self, vector: impl Into<Vec2>) -> Vec2 {
        let v = vector.into();
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Component-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(&self, other: &Matrix2, max_abs_diff: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(lhs, rhs)| (lhs - rhs).abs() <= max_abs_diff)
    }

    /// `true` if all six components are finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Homogeneous 3x3 form (last row `0 0 1`).
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from(Affine2::from(*self))
    }
}

/// `lhs * rhs`: apply `rhs`, then `lhs`.
fn concat(lhs: &Matrix2, rhs: &Matrix2) -> Matrix2 {
    Matrix2::new(
        lhs.a * rhs.a + lhs.c * rhs.b,
        lhs.b * rhs.a + lhs.d * rhs.b,
        lhs.a * rhs.c + lhs.c * rhs.d,
        lhs.b * rhs.c + lhs.d * rhs.d,
        lhs.a * rhs.tx + lhs.c * rhs.ty + lhs.tx,
        lhs.b * rhs.tx + lhs.d * rhs.ty + lhs.ty,
    )
}

fn sign_of(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

impl Mul for Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: Matrix2) -> Matrix2 {
        concat(&self, &rhs)
    }
}

impl Mul<Vec2> for Matrix2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}

impl From<Matrix2> for Affine2 {
    fn from(m: Matrix2) -> Self {
        Affine2::from_mat2_translation(
            Mat2::from_cols(Vec2::new(m.a, m.b), Vec2::new(m.c, m.d)),
            Vec2::new(m.tx, m.ty),
        )
    }
}

impl From<Affine2> for Matrix2 {
    fn from(affine: Affine2) -> Self {
        let x = affine.matrix2.x_axis;
        let y = affine.matrix2.y_axis;
        Matrix2::new(x.x, x.y, y.x, y.y, affine.translation.x, affine.translation.y)
    }
}

impl From<Matrix2> for Mat3 {
    fn from(m: Matrix2) -> Self {
        m.to_mat3()
    }
}

impl From<[f32; 6]> for Matrix2 {
    fn from(values: [f32; 6]) -> Self {
        Matrix2::from_array(values)
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}]",
            self.a, self.b, self.c, self.d, self.tx, self.ty
        )
    }
}

#[cfg(test)]
#[path = "matrix2_tests.rs"]
mod tests;
