/*!
# Scene Geometry

Vector and matrix math plus the camera geometry a renderer builds on.

## Architecture

- **Vectors / Matrices**: 2-, 3- and 4-component vectors, 3x3 and 4x4
  column-major matrices, in single and double precision
- **Frame**: orthonormal pose (origin, forward, up) with rotation,
  translation and matrix generation
- **Frustum**: six-plane view volume built from a projection and placed
  by a Frame, answering point, sphere, box and segment queries
- **Camera**: a Frame and a Frustum kept together
- **Culling**: bounding spheres tested against a placed Frustum
- **Diagnostics**: pluggable logger behind a severity threshold

Everything public is reachable through the [`geometry`] namespace.
*/

// Internal modules
mod error;
mod config;
mod diagnostics;
pub mod log;
pub mod math;
pub mod camera;
pub mod culling;

// Main geometry namespace module
pub mod geometry {
    // Error types
    pub use crate::error::{GeometryError, Result};

    // Configuration
    pub use crate::config::{Projection, Tolerance};

    // Logger registry
    pub use crate::diagnostics::Diagnostics;

    // Math types
    pub use crate::math::{
        Matrix33d, Matrix33f, Matrix44d, Matrix44f,
        Vector2d, Vector2f, Vector3d, Vector3f, Vector4d, Vector4f,
    };

    // Camera types
    pub use crate::camera::*;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Free geometry helpers
    pub mod utils {
        pub use crate::math::utils::*;
    }

    // Culling sub-module
    pub mod culling {
        pub use crate::culling::*;
    }
}

// Re-export math library at crate root
pub use glam;
