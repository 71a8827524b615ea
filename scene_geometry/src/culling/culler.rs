/// Sphere culling strategies.
///
/// A SphereCuller decides which bounding spheres are visible from a
/// placed frustum. Implementations range from brute force (return all)
/// to a data-parallel frustum test.

use crate::camera::Frustum;
use crate::math::Vector3f;
use super::visible_set::VisibleSet;

/// World-space bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub center: Vector3f,
    pub radius: f32,
}

impl BoundingSphere {
    pub const fn new(center: Vector3f, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Strategy for determining visible spheres.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to keep state across frames.
pub trait SphereCuller: Send + Sync {
    /// Cull `spheres` against `frustum` and return the visible indices.
    fn cull(&mut self, frustum: &Frustum, spheres: &[BoundingSphere]) -> VisibleSet;
}

/// Brute-force culler: returns every index (no actual culling).
///
/// Baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl SphereCuller for BruteForceCuller {
    fn cull(&mut self, frustum: &Frustum, spheres: &[BoundingSphere]) -> VisibleSet {
        VisibleSet::new(frustum.get_copy(), (0..spheres.len()).collect())
    }
}

/// Frustum culler: tests each sphere against the six planes.
#[derive(Debug, Default)]
pub struct FrustumCuller;

impl FrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

impl SphereCuller for FrustumCuller {
    fn cull(&mut self, frustum: &Frustum, spheres: &[BoundingSphere]) -> VisibleSet {
        if !placed(frustum) {
            return VisibleSet::new(frustum.get_copy(), Vec::new());
        }

        let visible: Vec<usize> = spheres
            .iter()
            .enumerate()
            .filter(|(_, sphere)| frustum.in_view(&sphere.center, sphere.radius))
            .map(|(index, _)| index)
            .collect();

        crate::geom_trace!("geometry::FrustumCuller", "{} of {} spheres visible", visible.len(), spheres.len());
        VisibleSet::new(frustum.get_copy(), visible)
    }
}

/// Frustum culler that splits the sphere slice across the rayon pool.
///
/// Each worker reads the same frustum snapshot; the result is identical
/// to [`FrustumCuller`], indices in ascending order.
#[cfg(feature = "parallel")]
#[derive(Debug, Default)]
pub struct ParallelFrustumCuller;

#[cfg(feature = "parallel")]
impl ParallelFrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "parallel")]
impl SphereCuller for ParallelFrustumCuller {
    fn cull(&mut self, frustum: &Frustum, spheres: &[BoundingSphere]) -> VisibleSet {
        use rayon::prelude::*;

        if !placed(frustum) {
            return VisibleSet::new(frustum.get_copy(), Vec::new());
        }

        let snapshot = frustum.get_copy();
        let visible: Vec<usize> = spheres
            .par_iter()
            .enumerate()
            .filter(|(_, sphere)| snapshot.in_view(&sphere.center, sphere.radius))
            .map(|(index, _)| index)
            .collect();

        crate::geom_trace!("geometry::ParallelFrustumCuller", "{} of {} spheres visible", visible.len(), spheres.len());
        VisibleSet::new(snapshot, visible)
    }
}

fn placed(frustum: &Frustum) -> bool {
    if frustum.is_transformed() {
        return true;
    }
    crate::geom_warn!("geometry::Culler", "Culling against a frustum that was never transformed");
    false
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
