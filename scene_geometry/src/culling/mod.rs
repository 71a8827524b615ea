//! Culling module: bounding spheres tested against a placed frustum.
//!
//! The caller owns the spheres. A culler only reports which indices
//! survive, packaged with the frustum snapshot it used.

mod culler;
mod visible_set;

pub use culler::{BoundingSphere, BruteForceCuller, FrustumCuller, SphereCuller};
#[cfg(feature = "parallel")]
pub use culler::ParallelFrustumCuller;
pub use visible_set::VisibleSet;
