/// Frustum: six-plane view volume for visibility tests.
///
/// A frustum is configured from projection parameters, which fixes the
/// projection matrix and eight corners in camera space (the camera at the
/// origin looking down -Z). `transform()` then places those corners in world
/// space with a [`Frame`] and derives the six planes from them.
///
/// Each plane is a Vector4f (A, B, C, D) with Ax + By + Cz + D = 0, the
/// normal (A, B, C) pointing into the volume. A point is inside when its
/// signed distance to every plane is non-negative.
///
/// Queries read the state left by the last `transform()`. The unchecked
/// queries never fail: before the first transform the planes are all zero
/// and every test comes back false. The `checked_*` variants return
/// [`GeometryError::NotTransformed`] instead.

use crate::config::{Projection, Tolerance};
use crate::error::{GeometryError, Result};
use crate::math::utils::{self, deg_to_rad};
use crate::math::{Matrix44f, Vector3f, Vector4f};
use super::frame::Frame;

/// Result of a 3-way classification against the frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Entirely outside
    Outside,
    /// Entirely inside
    Inside,
    /// Straddles at least one plane
    Partial,
}

/// Frustum plane indices
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_TOP: usize = 4;
pub const PLANE_BOTTOM: usize = 5;

/// Corner indices (UL = upper left, LR = lower right, seen from the eye)
pub const CORNER_NEAR_UL: usize = 0;
pub const CORNER_NEAR_LL: usize = 1;
pub const CORNER_NEAR_UR: usize = 2;
pub const CORNER_NEAR_LR: usize = 3;
pub const CORNER_FAR_UL: usize = 4;
pub const CORNER_FAR_LL: usize = 5;
pub const CORNER_FAR_UR: usize = 6;
pub const CORNER_FAR_LR: usize = 7;

/// View volume. `Copy`, so snapshots are free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    projection: Projection,
    projection_matrix: Matrix44f,
    /// Camera-space corners, fixed by the projection
    corners: [Vector3f; 8],
    /// World-space corners from the last transform
    transformed_corners: [Vector3f; 8],
    /// Inward planes: near, far, left, right, top, bottom
    planes: [Vector4f; 6],
    tolerance: Tolerance,
    transformed: bool,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

impl Frustum {
    /// Orthographic unit cube `[-1, 1]³`, not yet transformed.
    pub fn new() -> Self {
        Self::from_projection(Projection::default())
    }

    pub fn orthographic(x_min: f32, x_max: f32, y_min: f32, y_max: f32, z_min: f32, z_max: f32) -> Self {
        Self::from_projection(Projection::Orthographic { x_min, x_max, y_min, y_max, z_min, z_max })
    }

    /// Symmetric perspective, `fov_degrees` vertical.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::from_projection(Projection::Perspective { fov_degrees, aspect, near, far })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn asymmetric_perspective(
        fov_degrees: f32,
        aspect: f32,
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::from_projection(Projection::AsymmetricPerspective {
            fov_degrees, aspect, x_min, x_max, y_min, y_max, near, far,
        })
    }

    /// Build from parameters without validating them.
    pub fn from_projection(projection: Projection) -> Self {
        let mut frustum = Self {
            projection,
            projection_matrix: Matrix44f::IDENTITY,
            corners: [Vector3f::ZERO; 8],
            transformed_corners: [Vector3f::ZERO; 8],
            planes: [Vector4f::ZERO; 6],
            tolerance: Tolerance::DEFAULT,
            transformed: false,
        };
        frustum.set_projection(projection);
        frustum
    }

    /// Build from parameters, rejecting ones that cannot form a volume.
    pub fn try_from_projection(projection: Projection) -> Result<Self> {
        if let Err(error) = projection.validate() {
            crate::geom_error!("geometry::Frustum", "Rejected projection {:?}: {}", projection, error);
            return Err(error);
        }
        Ok(Self::from_projection(projection))
    }

    // ===== CONFIGURATION =====

    pub fn set_orthographic(&mut self, x_min: f32, x_max: f32, y_min: f32, y_max: f32, z_min: f32, z_max: f32) {
        self.set_projection(Projection::Orthographic { x_min, x_max, y_min, y_max, z_min, z_max });
    }

    pub fn set_perspective(&mut self, fov_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.set_projection(Projection::Perspective { fov_degrees, aspect, near, far });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_asymmetric_perspective(
        &mut self,
        fov_degrees: f32,
        aspect: f32,
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
        near: f32,
        far: f32,
    ) {
        self.set_projection(Projection::AsymmetricPerspective {
            fov_degrees, aspect, x_min, x_max, y_min, y_max, near, far,
        });
    }

    /// Recompute the projection matrix and the camera-space corners.
    ///
    /// The world-space state is stale afterwards; the frustum counts as not
    /// transformed until the next `transform()`.
    pub fn set_projection(&mut self, projection: Projection) {
        match projection {
            Projection::Orthographic { x_min, x_max, y_min, y_max, z_min, z_max } => {
                self.projection_matrix = Matrix44f::orthographic(x_min, x_max, y_min, y_max, z_min, z_max);
                self.corners = box_corners(x_min, x_max, y_min, y_max, -z_min, -z_max);
            }
            Projection::Perspective { fov_degrees, aspect, near, far } => {
                let fov = deg_to_rad(fov_degrees);
                self.projection_matrix = Matrix44f::perspective(fov, aspect, near, far);

                let (x_min, x_max, y_min, y_max) = symmetric_bounds(fov, aspect, near);
                self.corners = perspective_corners(fov, aspect, x_min, x_max, y_min, y_max, near, far);
            }
            Projection::AsymmetricPerspective {
                fov_degrees, aspect, x_min, x_max, y_min, y_max, near, far,
            } => {
                let fov = deg_to_rad(fov_degrees);
                self.projection_matrix = Matrix44f::frustum(x_min, x_max, y_min, y_max, near, far);
                self.corners = perspective_corners(fov, aspect, x_min, x_max, y_min, y_max, near, far);
            }
        }
        self.projection = projection;
        self.transformed = false;

        crate::geom_debug!("geometry::Frustum", "Projection set to {:?}", projection);
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    // ===== TRANSFORM =====

    /// Place the frustum at the camera described by `camera`.
    ///
    /// The corners go through the camera's model matrix (columns
    /// `cross(up, -forward)`, `up`, `-forward`, `origin`); the default frame
    /// leaves them where they are. Each plane is then built from three
    /// corners wound so its normal faces inward.
    pub fn transform(&mut self, camera: &Frame) {
        let back = -camera.forward();
        let up = camera.up();
        let model = Matrix44f::from_columns(
            Vector3f::cross(&up, &back).extend(0.0),
            up.extend(0.0),
            back.extend(0.0),
            camera.origin().extend(1.0),
        );

        for (world, local) in self.transformed_corners.iter_mut().zip(self.corners.iter()) {
            *world = model.transform_point(local);
        }

        self.planes = planes_from_corners(&self.transformed_corners);
        self.transformed = true;

        if self.planes.iter().any(|plane| !plane.is_valid()) {
            crate::geom_warn!(
                "geometry::Frustum",
                "Transform by frame {} produced non-finite planes",
                camera
            );
        }
    }

    pub fn is_transformed(&self) -> bool {
        self.transformed
    }

    // ===== ACCESSORS =====

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Column-major projection matrix, ready for upload.
    pub fn projection_matrix(&self) -> &Matrix44f {
        &self.projection_matrix
    }

    /// Camera-space corners (see the `CORNER_*` indices).
    pub fn corners(&self) -> &[Vector3f; 8] {
        &self.corners
    }

    /// World-space corners from the last transform.
    pub fn transformed_corners(&self) -> &[Vector3f; 8] {
        &self.transformed_corners
    }

    /// Planes from the last transform (see the `PLANE_*` indices).
    pub fn planes(&self) -> &[Vector4f; 6] {
        &self.planes
    }

    pub fn plane(&self, index: usize) -> Vector4f {
        self.planes[index]
    }

    /// Independent copy, for handing to worker threads.
    pub fn get_copy(&self) -> Frustum {
        *self
    }

    // ===== QUERIES =====

    /// True when a sphere at `point` with `radius` touches or is inside
    /// every plane. Boundary points count as inside.
    pub fn in_view(&self, point: &Vector3f, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| utils::signed_distance(point, plane) + radius >= 0.0)
    }

    /// Same test as [`Frustum::in_view`].
    pub fn test_sphere(&self, center: &Vector3f, radius: f32) -> bool {
        self.in_view(center, radius)
    }

    pub fn checked_in_view(&self, point: &Vector3f, radius: f32) -> Result<bool> {
        self.require_transformed("in_view")?;
        Ok(self.in_view(point, radius))
    }

    /// Where the line from `initial` toward `end` enters the frustum.
    ///
    /// `initial` is returned as-is when it is already inside. Otherwise the
    /// line is intersected with every plane and the finite intersection
    /// closest to `initial` that lies within `tolerance.entry_point_radius`
    /// of the volume wins. The intersection is taken on the infinite line,
    /// not only between the two points.
    pub fn entry_point(&self, initial: &Vector3f, end: &Vector3f) -> Option<Vector3f> {
        if self.in_view(initial, 0.0) {
            return Some(*initial);
        }

        let radius = self.tolerance.entry_point_radius;
        self.planes
            .iter()
            .map(|plane| Self::face_intersection(initial, end, plane))
            .filter(|candidate| candidate.is_valid() && self.in_view(candidate, radius))
            .min_by(|a, b| {
                a.distance_squared(initial)
                    .total_cmp(&b.distance_squared(initial))
            })
    }

    pub fn checked_entry_point(&self, initial: &Vector3f, end: &Vector3f) -> Result<Option<Vector3f>> {
        self.require_transformed("entry_point")?;
        Ok(self.entry_point(initial, end))
    }

    /// Intersection of the line through `initial` and `end` with `plane`.
    pub fn face_intersection(initial: &Vector3f, end: &Vector3f, plane: &Vector4f) -> Vector3f {
        utils::line_plane_intersection(initial, end, plane)
    }

    /// Some point on `plane`; see [`utils::point_on_plane`].
    pub fn point_on_plane(plane: &Vector4f) -> Vector3f {
        utils::point_on_plane(plane)
    }

    /// Classify a sphere as inside, outside or straddling.
    pub fn classify_sphere(&self, center: &Vector3f, radius: f32) -> FrustumTest {
        let mut all_inside = true;
        for plane in &self.planes {
            let distance = utils::signed_distance(center, plane);
            // NaN distances fail both comparisons and end up Outside
            if !(distance + radius >= 0.0) {
                return FrustumTest::Outside;
            }
            if distance < radius {
                all_inside = false;
            }
        }
        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// Whether an axis-aligned box may overlap the frustum.
    ///
    /// "Positive vertex" test: for each plane only the corner furthest
    /// along the normal is checked. Conservative near the frustum edges,
    /// never rejects a visible box.
    pub fn intersects_box(&self, min: &Vector3f, max: &Vector3f) -> bool {
        self.planes.iter().all(|plane| {
            let p_vertex = positive_vertex(plane, min, max);
            utils::distance_to_plane(&p_vertex, plane) >= 0.0
        })
    }

    /// 3-way classification of an axis-aligned box.
    pub fn classify_box(&self, min: &Vector3f, max: &Vector3f) -> FrustumTest {
        let mut all_inside = true;
        for plane in &self.planes {
            let p_vertex = positive_vertex(plane, min, max);
            if !(utils::distance_to_plane(&p_vertex, plane) >= 0.0) {
                return FrustumTest::Outside;
            }
            // Negative vertex: the corner least along the normal
            let n_vertex = positive_vertex(plane, max, min);
            if utils::distance_to_plane(&n_vertex, plane) < 0.0 {
                all_inside = false;
            }
        }
        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    fn require_transformed(&self, query: &str) -> Result<()> {
        if self.transformed {
            return Ok(());
        }
        crate::geom_error!("geometry::Frustum", "{} queried before transform()", query);
        Err(GeometryError::NotTransformed(format!(
            "{} called before transform()",
            query
        )))
    }
}

/// `(x_min, x_max, y_min, y_max)` of a symmetric view at distance `depth`.
fn symmetric_bounds(fov: f32, aspect: f32, depth: f32) -> (f32, f32, f32, f32) {
    let y_max = depth * (fov * 0.5).tan();
    let y_min = -y_max;
    let x_min = y_min * aspect;
    let x_max = -x_min;
    (x_min, x_max, y_min, y_max)
}

/// Perspective corners: the near face from the given bounds, the far face
/// from the field of view at `far`.
#[allow(clippy::too_many_arguments)]
fn perspective_corners(
    fov: f32,
    aspect: f32,
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    near: f32,
    far: f32,
) -> [Vector3f; 8] {
    let (fx_min, fx_max, fy_min, fy_max) = symmetric_bounds(fov, aspect, far);
    let mut corners = [Vector3f::ZERO; 8];
    corners[CORNER_NEAR_UL] = Vector3f::new(x_min, y_max, -near);
    corners[CORNER_NEAR_LL] = Vector3f::new(x_min, y_min, -near);
    corners[CORNER_NEAR_UR] = Vector3f::new(x_max, y_max, -near);
    corners[CORNER_NEAR_LR] = Vector3f::new(x_max, y_min, -near);
    corners[CORNER_FAR_UL] = Vector3f::new(fx_min, fy_max, -far);
    corners[CORNER_FAR_LL] = Vector3f::new(fx_min, fy_min, -far);
    corners[CORNER_FAR_UR] = Vector3f::new(fx_max, fy_max, -far);
    corners[CORNER_FAR_LR] = Vector3f::new(fx_max, fy_min, -far);
    corners
}

/// Box corners with the near face at `z_near` and the far face at `z_far`.
fn box_corners(x_min: f32, x_max: f32, y_min: f32, y_max: f32, z_near: f32, z_far: f32) -> [Vector3f; 8] {
    let mut corners = [Vector3f::ZERO; 8];
    corners[CORNER_NEAR_UL] = Vector3f::new(x_min, y_max, z_near);
    corners[CORNER_NEAR_LL] = Vector3f::new(x_min, y_min, z_near);
    corners[CORNER_NEAR_UR] = Vector3f::new(x_max, y_max, z_near);
    corners[CORNER_NEAR_LR] = Vector3f::new(x_max, y_min, z_near);
    corners[CORNER_FAR_UL] = Vector3f::new(x_min, y_max, z_far);
    corners[CORNER_FAR_LL] = Vector3f::new(x_min, y_min, z_far);
    corners[CORNER_FAR_UR] = Vector3f::new(x_max, y_max, z_far);
    corners[CORNER_FAR_LR] = Vector3f::new(x_max, y_min, z_far);
    corners
}

/// The six inward planes of a corner set.
///
/// Winding per face is fixed: with `plane_equation(p1, p2, p3)` taking its
/// normal from `(p3 - p1) × (p2 - p1)`, these orders all face inward.
pub(crate) fn planes_from_corners(c: &[Vector3f; 8]) -> [Vector4f; 6] {
    let mut planes = [Vector4f::ZERO; 6];
    planes[PLANE_NEAR] = utils::plane_equation(&c[CORNER_NEAR_UL], &c[CORNER_NEAR_LL], &c[CORNER_NEAR_LR]);
    planes[PLANE_FAR] = utils::plane_equation(&c[CORNER_FAR_UL], &c[CORNER_FAR_UR], &c[CORNER_FAR_LR]);
    planes[PLANE_LEFT] = utils::plane_equation(&c[CORNER_NEAR_LL], &c[CORNER_NEAR_UL], &c[CORNER_FAR_UL]);
    planes[PLANE_RIGHT] = utils::plane_equation(&c[CORNER_NEAR_LR], &c[CORNER_FAR_LR], &c[CORNER_FAR_UR]);
    planes[PLANE_TOP] = utils::plane_equation(&c[CORNER_NEAR_UL], &c[CORNER_NEAR_UR], &c[CORNER_FAR_UR]);
    planes[PLANE_BOTTOM] = utils::plane_equation(&c[CORNER_NEAR_LL], &c[CORNER_FAR_LL], &c[CORNER_FAR_LR]);
    planes
}

/// Corner of the box `[min, max]` furthest along the plane normal.
fn positive_vertex(plane: &Vector4f, min: &Vector3f, max: &Vector3f) -> Vector3f {
    Vector3f::new(
        if plane.x >= 0.0 { max.x } else { min.x },
        if plane.y >= 0.0 { max.y } else { min.y },
        if plane.z >= 0.0 { max.z } else { min.z },
    )
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
