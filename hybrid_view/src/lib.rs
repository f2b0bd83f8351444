/*!
# Hybrid View

Projection and 2D transform math for viewers that switch between
perspective and orthographic cameras.

## Architecture

- **HybridCamera**: perspective/orthographic projection model with a fit
  policy against a 1000-unit reference size, distance-derived orthographic
  zoom and view-offset tiles
- **CameraHost**: capability trait supplying the camera position and the
  clip-space convention (replaces inheriting from a scene camera type)
- **Matrix2**: 2D affine matrix with composition, decomposition, inversion
  and point transformation
- **Diagnostics**: replaceable logger used to report degenerate results

Both numeric components are plain values: no shared state, no I/O.
*/

// Internal modules
mod error;
pub mod camera;
pub mod diagnostics;
pub mod log;
pub mod matrix2;

// Main hybrid namespace module
pub mod hybrid {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger holder
    pub use crate::diagnostics::Diagnostics;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // 2D affine sub-module
    pub mod matrix2 {
        pub use crate::matrix2::*;
    }
}

// Re-export math library at crate root
pub use glam;
