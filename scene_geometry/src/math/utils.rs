//! Geometry helpers shared by Frame and Frustum.
//!
//! Plane equations are `Vector4f (a, b, c, d)` for `ax + by + cz + d = 0`.
//! The normal `(a, b, c)` is not assumed to be unit length unless a
//! function says otherwise.

use super::matrix::Matrix44f;
use super::vector::{Vector3f, Vector4f};

pub const TWO_PI: f32 = std::f32::consts::TAU;
pub const PI_DIV_180: f32 = std::f32::consts::PI / 180.0;
pub const INV_PI_DIV_180: f32 = 180.0 / std::f32::consts::PI;

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * PI_DIV_180
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians * INV_PI_DIV_180
}

/// `|candidate - compare| < epsilon` (strict).
pub fn close_enough(candidate: f32, compare: f32, epsilon: f32) -> bool {
    (candidate - compare).abs() < epsilon
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smooth step of `x` between two edges, clamped to `[0, 1]`.
pub fn smooth_step(edge1: f32, edge2: f32, x: f32) -> f32 {
    let t = ((x - edge1) / (edge2 - edge1)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Catmull-Rom spline through `p1` (t = 0) and `p2` (t = 1).
pub fn catmull_rom(p0: &Vector3f, p1: &Vector3f, p2: &Vector3f, p3: &Vector3f, t: f32) -> Vector3f {
    let t2 = t * t;
    let t3 = t2 * t;
    let axis = |a0: f32, a1: f32, a2: f32, a3: f32| {
        0.5 * ((2.0 * a1)
            + (-a0 + a2) * t
            + (2.0 * a0 - 5.0 * a1 + 4.0 * a2 - a3) * t2
            + (-a0 + 3.0 * a1 - 3.0 * a2 + a3) * t3)
    };
    Vector3f::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
        axis(p0.z, p1.z, p2.z, p3.z),
    )
}

pub fn distance(a: &Vector3f, b: &Vector3f) -> f32 {
    a.distance(b)
}

pub fn distance_squared(a: &Vector3f, b: &Vector3f) -> f32 {
    a.distance_squared(b)
}

/// `P·n + d` without dividing by `|n|`.
pub fn distance_to_plane(point: &Vector3f, plane: &Vector4f) -> f32 {
    point.x * plane.x + point.y * plane.y + point.z * plane.z + plane.w
}

/// Signed distance `(P·n + d) / |n|`, positive on the side the normal faces.
pub fn signed_distance(point: &Vector3f, plane: &Vector4f) -> f32 {
    distance_to_plane(point, plane) / plane.truncate().length()
}

/// Plane through three points.
///
/// The normal is `(p3 - p1) × (p2 - p1)`, normalized, so the winding of the
/// points decides which side is positive.
pub fn plane_equation(p1: &Vector3f, p2: &Vector3f, p3: &Vector3f) -> Vector4f {
    let v1 = *p3 - *p1;
    let v2 = *p2 - *p1;

    let mut normal = Vector3f::cross(&v1, &v2);
    normal.normalize();

    let d = -normal.dot(p3);
    normal.extend(d)
}

/// Any point lying on `plane`.
///
/// Two coordinates are fixed at zero and the third is solved for: Z when
/// `c != 0`, otherwise Y when `b != 0`, otherwise X. A plane with an
/// all-zero normal has no solution and the result is non-finite.
pub fn point_on_plane(plane: &Vector4f) -> Vector3f {
    if plane.z != 0.0 {
        Vector3f::new(0.0, 0.0, -plane.w / plane.z)
    } else if plane.y != 0.0 {
        Vector3f::new(0.0, -plane.w / plane.y, 0.0)
    } else {
        Vector3f::new(-plane.w / plane.x, 0.0, 0.0)
    }
}

/// Intersection of the line `initial + t·(end - initial)` with `plane`.
///
/// `t` is not limited to `[0, 1]`. A line parallel to the plane divides by
/// zero and yields a non-finite point; check `is_valid()`.
pub fn line_plane_intersection(initial: &Vector3f, end: &Vector3f, plane: &Vector4f) -> Vector3f {
    let normal = plane.truncate();
    let direction = *end - *initial;
    let on_plane = point_on_plane(plane);

    let t = normal.dot(&(on_plane - *initial)) / normal.dot(&direction);
    *initial + direction * t
}

/// Ray/sphere test.
///
/// Returns the distance along the ray to the first intersection, 0 when the
/// ray is tangent, and a negative value when it misses. `ray` is normalized
/// before use.
pub fn ray_sphere_test(point: &Vector3f, ray: &Vector3f, sphere_center: &Vector3f, sphere_radius: f32) -> f32 {
    let ray = ray.normalized();
    let ray_to_center = *sphere_center - *point;

    // Projection of the centre onto the ray
    let a = ray_to_center.dot(&ray);
    let distance2 = ray_to_center.dot(&ray_to_center);

    let d = (sphere_radius * sphere_radius) - distance2 + (a * a);
    if d > 0.0 {
        a - d.sqrt()
    } else {
        d
    }
}

/// Closest point to `point` on a ray with unit direction.
///
/// Returns the point and its squared distance to `point`.
pub fn closest_point_on_ray(ray_origin: &Vector3f, unit_ray_dir: &Vector3f, point: &Vector3f) -> (Vector3f, f32) {
    let t = unit_ray_dir.dot(&(*point - *ray_origin));
    let on_ray = *ray_origin + *unit_ray_dir * t;
    (on_ray, on_ray.distance_squared(point))
}

/// Matrix that flattens geometry onto `plane` along the direction of a
/// distant light.
///
/// `light` points from the scene toward the light; the result is a
/// projective matrix, divide by `w` after transforming.
pub fn planar_shadow_matrix(plane: &Vector4f, light: &Vector3f) -> Matrix44f {
    let (a, b, c, d) = (plane.x, plane.y, plane.z, plane.w);
    let (dx, dy, dz) = (-light.x, -light.y, -light.z);

    Matrix44f::from_cols_array([
        b * dy + c * dz, -a * dy, -a * dz, 0.0,
        -b * dx, a * dx + c * dz, -b * dz, 0.0,
        -c * dx, -c * dy, a * dx + b * dy, 0.0,
        -d * dx, -d * dy, -d * dz, a * dx + b * dy + c * dz,
    ])
}

/// Extract the six clip planes of a view-projection matrix.
///
/// Gribb & Hartmann: each plane is the sum or difference of the fourth row
/// with one of the others. Planes come back in the Frustum order (near, far,
/// left, right, top, bottom), normals pointing inward and normalized.
pub fn extract_planes(view_projection: &Matrix44f) -> [Vector4f; 6] {
    let row = |r: usize| {
        Vector4f::new(
            view_projection.get(r, 0),
            view_projection.get(r, 1),
            view_projection.get(r, 2),
            view_projection.get(r, 3),
        )
    };
    let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

    let mut planes = [
        r3 + r2, // near
        r3 - r2, // far
        r3 + r0, // left
        r3 - r0, // right
        r3 - r1, // top
        r3 + r1, // bottom
    ];

    for plane in &mut planes {
        let normal_len = plane.truncate().length();
        if normal_len > 0.0 {
            *plane = *plane * (1.0 / normal_len);
        }
    }

    planes
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;
