/// HybridCamera: perspective/orthographic projection model.
///
/// Holds the camera parameters (field of view, clip planes, fit policy,
/// orthographic extents, view offset) and derives the projection matrix
/// and its inverse. Every mutation that affects the frustum rebuilds the
/// matrices immediately; there is no dirty flag.
///
/// Sizes are interpreted against a fixed logical reference extent
/// (`REFERENCE_SIZE`) according to the `Fit` policy. The orthographic
/// frustum additionally scales with the distance between the host position
/// and `target`, one world unit per `REFERENCE_WORLD_RATIO`.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;
use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use super::frustum::Frustum;
use super::host::{CameraHost, CameraRig, Positioned};
use super::projection::{orthographic_off_center, perspective_off_center};

const SOURCE: &str = "hybrid_view::Camera";

/// Logical reference extent used by the fit policy.
pub const REFERENCE_SIZE: f32 = 1000.0;

/// Pixels per world unit for the orthographic distance-derived zoom.
pub const REFERENCE_WORLD_RATIO: f32 = 1000.0;

/// Default vertical field of view in degrees.
pub const DEFAULT_FIELD_OF_VIEW: f32 = 50.0;

pub const PERSPECTIVE_NEAR: f32 = 0.01;
pub const PERSPECTIVE_FAR: f32 = 1000.0;
pub const ORTHOGRAPHIC_NEAR: f32 = -1000.0;
pub const ORTHOGRAPHIC_FAR: f32 = 1000.0;

// ===== ENUMS =====

/// Frustum construction branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    /// Lowercase name used by external data.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthographic => "orthographic",
        }
    }

    /// Default clip planes for this mode.
    pub fn default_near_far(&self) -> (f32, f32) {
        match self {
            ProjectionMode::Perspective => (PERSPECTIVE_NEAR, PERSPECTIVE_FAR),
            ProjectionMode::Orthographic => (ORTHOGRAPHIC_NEAR, ORTHOGRAPHIC_FAR),
        }
    }
}

impl FromStr for ProjectionMode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "perspective" => Ok(ProjectionMode::Perspective),
            "orthographic" => Ok(ProjectionMode::Orthographic),
            _ => Err(Error::UnknownProjectionMode(name.to_string())),
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resize policy relative to `REFERENCE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    /// Frustum follows the viewport size in pixels
    #[default]
    None,
    /// Horizontal extent pinned to the reference size
    Width,
    /// Vertical extent pinned to the reference size
    Height,
}

impl Fit {
    /// Lowercase name used by external data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fit::None => "none",
            Fit::Width => "width",
            Fit::Height => "height",
        }
    }
}

impl FromStr for Fit {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Ok(Fit::None),
            "width" => Ok(Fit::Width),
            "height" => Ok(Fit::Height),
            _ => Err(Error::UnknownFit(name.to_string())),
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== VIEW OFFSET =====

/// Sub-rectangle of a larger virtual viewport (one tile of the full frustum).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOffset {
    pub full_width: f32,
    pub full_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewOffset {
    pub fn new(
        full_width: f32,
        full_height: f32,
        offset_x: f32,
        offset_y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self { full_width, full_height, offset_x, offset_y, width, height }
    }
}

// ===== DESCRIPTOR =====

/// Construction parameters for `HybridCamera`.
///
/// `near`/`far` default per projection mode when `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDesc {
    pub projection_mode: ProjectionMode,
    pub fit: Fit,
    /// Degrees
    pub field_of_view: f32,
    pub near: Option<f32>,
    pub far: Option<f32>,
    /// Initial viewport width
    pub width: f32,
    /// Initial viewport height
    pub height: f32,
    /// Orthographic look-at point
    pub target: Vec3,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            projection_mode: ProjectionMode::Perspective,
            fit: Fit::None,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            near: None,
            far: None,
            width: REFERENCE_SIZE,
            height: REFERENCE_SIZE,
            target: Vec3::ZERO,
        }
    }
}

// ===== CAMERA =====

/// Perspective/orthographic projection model hosted by `H`.
#[derive(Debug, Clone)]
pub struct HybridCamera<H: CameraHost = CameraRig> {
    host: H,
    /// `None` after an unrecognised mode name: both branches are disabled
    projection_mode: Option<ProjectionMode>,
    fit: Fit,
    field_of_view: f32,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
    zoom: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    target: Vec3,
    view: Option<ViewOffset>,
    width: f32,
    height: f32,
    projection_matrix: Mat4,
    projection_matrix_inverse: Mat4,
}

impl HybridCamera<CameraRig> {
    /// Create a camera on a default `CameraRig`.
    pub fn from_desc(desc: CameraDesc) -> Result<Self> {
        Self::new(desc, CameraRig::default())
    }
}

impl<H: CameraHost> HybridCamera<H> {
    /// Create a camera and derive its initial projection from
    /// `desc.width` x `desc.height`.
    pub fn new(desc: CameraDesc, host: H) -> Result<Self> {
        let (default_near, default_far) = desc.projection_mode.default_near_far();

        let mut camera = Self {
            host,
            projection_mode: Some(desc.projection_mode),
            fit: desc.fit,
            field_of_view: desc.field_of_view,
            fov: desc.field_of_view,
            near: desc.near.unwrap_or(default_near),
            far: desc.far.unwrap_or(default_far),
            aspect: 1.0,
            zoom: 1.0,
            left: -0.5 * desc.width,
            right: 0.5 * desc.width,
            top: 0.5 * desc.height,
            bottom: -0.5 * desc.height,
            target: desc.target,
            view: None,
            width: desc.width,
            height: desc.height,
            projection_matrix: Mat4::IDENTITY,
            projection_matrix_inverse: Mat4::IDENTITY,
        };

        crate::view_debug!(
            SOURCE,
            "Creating {} camera (fit {}, near {}, far {})",
            desc.projection_mode, camera.fit, camera.near, camera.far
        );

        camera.set_size(desc.width, desc.height)?;
        Ok(camera)
    }

    // ===== GETTERS =====

    /// Host object (position, coordinate system).
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host. Call `update_projection_matrix` after moving an
    /// orthographic camera.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active mode, `None` in the degenerate "no camera" state.
    pub fn projection_mode(&self) -> Option<ProjectionMode> {
        self.projection_mode
    }

    pub fn is_perspective(&self) -> bool {
        self.projection_mode == Some(ProjectionMode::Perspective)
    }

    pub fn is_orthographic(&self) -> bool {
        self.projection_mode == Some(ProjectionMode::Orthographic)
    }

    pub fn fit(&self) -> Fit {
        self.fit
    }

    /// Vertical field of view at the reference size (degrees).
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Effective vertical field of view after fit adjustment (degrees).
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Width / height of the last size.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Perspective zoom divisor. The orthographic zoom is derived from the
    /// target distance and never stored here.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Orthographic base extents `(left, right, top, bottom)` before zoom.
    pub fn extents(&self) -> (f32, f32, f32, f32) {
        (self.left, self.right, self.top, self.bottom)
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn view_offset(&self) -> Option<&ViewOffset> {
        self.view.as_ref()
    }

    /// Last size passed to `set_size`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn projection_matrix_inverse(&self) -> &Mat4 {
        &self.projection_matrix_inverse
    }

    /// Projection matrix bytes (column-major f32) for uniform upload.
    pub fn projection_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.projection_matrix)
    }

    /// Inverse projection matrix bytes (column-major f32).
    pub fn projection_inverse_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.projection_matrix_inverse)
    }

    /// Camera-space frustum planes of the current projection.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_projection(&self.projection_matrix, self.host.coordinate_system())
    }

    /// Orthographic zoom for the current host position and target.
    pub fn orthographic_zoom(&self) -> f32 {
        self.host.position().distance(self.target) / REFERENCE_WORLD_RATIO
    }

    // ===== SIZE / FIT =====

    /// Apply a new viewport size.
    ///
    /// Recomputes the aspect ratio, the effective field of view and the
    /// orthographic base extents according to the fit policy, then rebuilds
    /// the projection. Dimensions must be positive.
    pub fn set_size(&mut self, width: f32, height: f32) -> Result<&mut Self> {
        self.width = width;
        self.height = height;
        self.aspect = width / height;

        self.fov = match self.fit {
            // Keep the on-screen vertical scale stable for non-reference heights
            Fit::None => {
                let half_fov = PI / 180.0 * self.field_of_view / 2.0;
                (360.0 / PI) * (half_fov.tan() * (height / REFERENCE_SIZE)).atan()
            }
            Fit::Width | Fit::Height => self.field_of_view,
        };

        let (mut extent_width, mut extent_height) = match self.fit {
            Fit::None => (width, height),
            Fit::Width | Fit::Height => (REFERENCE_SIZE, REFERENCE_SIZE),
        };
        match self.fit {
            Fit::Width => extent_height /= self.aspect,
            Fit::Height => extent_width *= self.aspect,
            Fit::None => {}
        }

        self.left = -0.5 * extent_width;
        self.right = 0.5 * extent_width;
        self.top = 0.5 * extent_height;
        self.bottom = -0.5 * extent_height;

        crate::view_trace!(
            SOURCE,
            "set_size({}, {}): aspect {}, fov {}, extents {}x{}",
            width, height, self.aspect, self.fov, extent_width, extent_height
        );

        self.update_projection_matrix()
    }

    /// Change the fit policy and re-derive from the last size.
    pub fn set_fit(&mut self, fit: Fit) -> Result<&mut Self> {
        self.fit = fit;
        self.set_size(self.width, self.height)
    }

    /// Change the reference field of view (degrees) and re-derive.
    pub fn set_field_of_view(&mut self, field_of_view: f32) -> Result<&mut Self> {
        self.field_of_view = field_of_view;
        self.set_size(self.width, self.height)
    }

    /// Change both clip planes and rebuild.
    pub fn set_near_far(&mut self, near: f32, far: f32) -> Result<&mut Self> {
        self.near = near;
        self.far = far;
        self.update_projection_matrix()
    }

    /// Change the perspective zoom divisor and rebuild.
    pub fn set_zoom(&mut self, zoom: f32) -> Result<&mut Self> {
        self.zoom = zoom;
        self.update_projection_matrix()
    }

    // ===== MODE =====

    /// Switch between perspective and orthographic.
    ///
    /// `near` is re-derived from `far`: `10 / far` for perspective and
    /// `-far` for orthographic. `far` is kept.
    pub fn change_type(&mut self, mode: ProjectionMode) -> Result<&mut Self> {
        self.projection_mode = Some(mode);
        self.near = match mode {
            ProjectionMode::Perspective => 10.0 / self.far,
            ProjectionMode::Orthographic => -self.far,
        };

        crate::view_debug!(SOURCE, "Switched to {} (near {}, far {})", mode, self.near, self.far);

        self.update_projection_matrix()
    }

    /// Switch mode by name.
    ///
    /// An unrecognised name leaves the camera with no active mode: updates
    /// become no-ops and the current matrices are kept.
    pub fn change_type_named(&mut self, name: &str) -> Result<&mut Self> {
        match name.parse::<ProjectionMode>() {
            Ok(mode) => self.change_type(mode),
            Err(error) => {
                crate::view_warn!(SOURCE, "{}; projection disabled", error);
                self.projection_mode = None;
                Ok(self)
            }
        }
    }

    // ===== VIEW OFFSET =====

    /// Render only `view` out of its full virtual viewport.
    ///
    /// The frustum is re-derived for the full size; the tile is cut out of
    /// it when the matrix is built.
    pub fn set_view_offset(&mut self, view: ViewOffset) -> Result<&mut Self> {
        self.view = Some(view);
        self.set_size(view.full_width, view.full_height)
    }

    /// Remove the view offset and restore the full frustum. No-op without one.
    pub fn clear_view_offset(&mut self) -> Result<&mut Self> {
        if self.view.take().is_none() {
            return Ok(self);
        }
        self.set_size(self.width, self.height)
    }

    // ===== COPY =====

    /// Copy parameters and mode from `source`, then re-derive from its last
    /// size. The view offset and the host are not copied.
    pub fn copy_from<S: CameraHost>(&mut self, source: &HybridCamera<S>) -> Result<&mut Self> {
        self.projection_mode = source.projection_mode;
        self.fit = source.fit;
        self.field_of_view = source.field_of_view;
        self.fov = source.fov;
        self.near = source.near;
        self.far = source.far;
        self.aspect = source.aspect;
        self.zoom = source.zoom;
        self.left = source.left;
        self.right = source.right;
        self.top = source.top;
        self.bottom = source.bottom;
        self.target = source.target;

        self.set_size(source.width, source.height)
    }

    // ===== PROJECTION =====

    /// Rebuild the projection matrix and its inverse.
    ///
    /// A non-finite or non-invertible result is reported as
    /// `Error::DegenerateProjection`; the previous matrices are kept.
    pub fn update_projection_matrix(&mut self) -> Result<&mut Self> {
        let projection = match self.projection_mode {
            Some(ProjectionMode::Perspective) => self.perspective_projection(),
            Some(ProjectionMode::Orthographic) => self.orthographic_projection(),
            None => return Ok(self),
        };

        self.install_projection(projection)?;
        Ok(self)
    }

    /// Same as `update_projection_matrix`, but an orthographic camera first
    /// takes `target` (a point or any positioned object) as its new target.
    pub fn update_projection_matrix_with_target<T: Positioned + ?Sized>(
        &mut self,
        target: &T,
    ) -> Result<&mut Self> {
        if self.is_orthographic() {
            self.target = target.position();
        }
        self.update_projection_matrix()
    }

    fn perspective_projection(&self) -> Mat4 {
        let near = self.near;
        let mut top = near * (0.5 * self.fov.to_radians()).tan() / self.zoom;
        let mut height = 2.0 * top;
        let mut width = self.aspect * height;
        let mut left = -0.5 * width;

        if let Some(view) = &self.view {
            left += view.offset_x * width / view.full_width;
            top -= view.offset_y * height / view.full_height;
            width *= view.width / view.full_width;
            height *= view.height / view.full_height;
        }

        perspective_off_center(
            left,
            left + width,
            top,
            top - height,
            near,
            self.far,
            self.host.coordinate_system(),
        )
    }

    fn orthographic_projection(&mut self) -> Mat4 {
        self.host.update_matrix_world();
        let zoom = self.orthographic_zoom();

        let half_width = 0.5 * (self.right - self.left) * zoom;
        let half_height = 0.5 * (self.top - self.bottom) * zoom;
        let center_x = 0.5 * (self.right + self.left);
        let center_y = 0.5 * (self.top + self.bottom);

        let mut left = center_x - half_width;
        let mut right = center_x + half_width;
        let mut top = center_y + half_height;
        let mut bottom = center_y - half_height;

        if let Some(view) = &self.view {
            let scale_width = (right - left) / view.full_width;
            let scale_height = (top - bottom) / view.full_height;

            left += scale_width * view.offset_x;
            right = left + scale_width * view.width;
            top -= scale_height * view.offset_y;
            bottom = top - scale_height * view.height;
        }

        orthographic_off_center(
            left,
            right,
            top,
            bottom,
            self.near,
            self.far,
            self.host.coordinate_system(),
        )
    }

    fn install_projection(&mut self, projection: Mat4) -> Result<()> {
        if !projection.is_finite() {
            return Err(self.projection_fault(format!(
                "{} projection is not finite",
                self.mode_name()
            )));
        }

        let determinant = projection.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(self.projection_fault(format!(
                "{} projection is not invertible (determinant {})",
                self.mode_name(),
                determinant
            )));
        }

        let inverse = projection.inverse();
        if !inverse.is_finite() {
            return Err(self.projection_fault(format!(
                "{} projection inverse is not finite",
                self.mode_name()
            )));
        }

        self.projection_matrix = projection;
        self.projection_matrix_inverse = inverse;
        Ok(())
    }

    fn projection_fault(&self, message: String) -> Error {
        crate::view_error!(
            SOURCE,
            "{} (size {}x{}, near {}, far {})",
            message, self.width, self.height, self.near, self.far
        );
        Error::DegenerateProjection(message)
    }

    fn mode_name(&self) -> &'static str {
        self.projection_mode.map_or("disabled", |mode| mode.as_str())
    }
}

#[cfg(test)]
#[path = "hybrid_camera_tests.rs"]
mod tests;
