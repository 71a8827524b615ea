//! Camera module: pose and view volume, alone or paired.
//!
//! Passive data containers. The crate does not store or manage cameras;
//! they are owned and driven by the caller.

mod camera;
mod frame;
mod frustum;

pub use camera::Camera;
pub use frame::Frame;
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_NEAR, PLANE_FAR, PLANE_LEFT, PLANE_RIGHT, PLANE_TOP, PLANE_BOTTOM,
    CORNER_NEAR_UL, CORNER_NEAR_LL, CORNER_NEAR_UR, CORNER_NEAR_LR,
    CORNER_FAR_UL, CORNER_FAR_LL, CORNER_FAR_UR, CORNER_FAR_LR,
};
