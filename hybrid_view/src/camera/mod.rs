//! Camera module: hybrid perspective/orthographic projection model.
//!
//! `HybridCamera` derives a projection matrix (and its inverse) from fit-aware
//! viewport sizes, clip planes and an optional view-offset tile. The camera
//! is hosted by any `CameraHost`, which supplies the world position and the
//! clip-space convention.

mod frustum;
mod host;
mod hybrid_camera;
mod projection;

pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use host::{CameraHost, CameraRig, CoordinateSystem, Positioned};
pub use hybrid_camera::{
    CameraDesc, Fit, HybridCamera, ProjectionMode, ViewOffset,
    DEFAULT_FIELD_OF_VIEW, ORTHOGRAPHIC_FAR, ORTHOGRAPHIC_NEAR, PERSPECTIVE_FAR,
    PERSPECTIVE_NEAR, REFERENCE_SIZE, REFERENCE_WORLD_RATIO,
};
pub use projection::{orthographic_off_center, perspective_off_center};
