/// Host capabilities required by `HybridCamera`.
///
/// The projection model does not own a scene transform. It reads the
/// camera position and clip-space convention from whatever object hosts it
/// (scene node, ECS component, plain rig) through `CameraHost`.

use glam::Vec3;

/// Clip-space depth convention of the consuming renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSystem {
    /// NDC depth in `[-1, 1]` (OpenGL / WebGL)
    #[default]
    OpenGl,
    /// NDC depth in `[0, 1]` (WebGPU / Vulkan / Direct3D)
    WebGpu,
}

/// Anything with a world-space position.
///
/// Used for orthographic targets, which may be a bare point or an object.
pub trait Positioned {
    /// World-space position.
    fn position(&self) -> Vec3;
}

impl Positioned for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

/// Object hosting a camera projection.
pub trait CameraHost: Positioned {
    /// Bring the world transform up to date before `position` is read.
    fn update_matrix_world(&mut self) {}

    /// Clip-space convention for the projection matrix.
    fn coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::OpenGl
    }
}

/// Minimal host: a position and a coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub coordinate_system: CoordinateSystem,
}

impl Default for CameraRig {
    /// One reference distance in front of the origin, so an orthographic
    /// camera targeting the origin starts at zoom 1.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, super::hybrid_camera::REFERENCE_WORLD_RATIO),
            coordinate_system: CoordinateSystem::OpenGl,
        }
    }
}

impl Positioned for CameraRig {
    fn position(&self) -> Vec3 {
        self.position
    }
}

impl CameraHost for CameraRig {
    fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }
}
